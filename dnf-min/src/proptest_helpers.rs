// Copyright (c) The dnf-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::truth_table::{RowValue, TruthTable};
use proptest::prelude::*;

impl Arbitrary for RowValue {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            Just(RowValue::Off),
            Just(RowValue::On),
            Just(RowValue::DontCare),
        ]
        .boxed()
    }
}

impl Arbitrary for TruthTable {
    /// The maximum number of variables, 4 by default.
    type Parameters = Option<usize>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(max_variables: Self::Parameters) -> Self::Strategy {
        let max_variables = max_variables.unwrap_or(4);
        // Generate 2^n row values for some n in 0..=max_variables.
        (0..=max_variables)
            .prop_flat_map(|variables| prop::collection::vec(any::<RowValue>(), 1 << variables))
            .prop_map(|rows| {
                TruthTable::from_rows(rows).expect("row count should be a power of two")
            })
            .boxed()
    }
}
