use std::fmt::Debug;
use std::ops::Add;

use ordered_float::OrderedFloat;

/// Distance type accepted by the searches. Must be totally ordered and
/// closed under addition; edge weights are assumed to be nonnegative.
pub trait Cost: Copy + Ord + Add<Output = Self> + Debug {
    const ZERO: Self;
}

macro_rules! impl_cost {
    ($($t:ty),*) => {
        $(impl Cost for $t {
            const ZERO: Self = 0;
        })*
    };
}

impl_cost!(u8, u16, u32, u64, usize, i32, i64);

impl Cost for OrderedFloat<f64> {
    const ZERO: Self = OrderedFloat(0.0);
}

impl Cost for OrderedFloat<f32> {
    const ZERO: Self = OrderedFloat(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_costs_order_totally() {
        let a = OrderedFloat(1.5_f64);
        let b = OrderedFloat(2.0_f64);
        assert!(a < b);
        assert_eq!(OrderedFloat::<f64>::ZERO + a, a);
    }
}
