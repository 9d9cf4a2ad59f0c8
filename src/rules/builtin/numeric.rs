//! Numeric bound rules: min, max, range, step
//!
//! A value that does not coerce to a number is out of these rules' domain
//! and passes; pair them with `number` to reject non-numeric input.

use crate::core::coerce_number;
use crate::rules::builtin::{param_bounds, param_number};
use crate::rules::message::display_param;
use crate::rules::{Rule, RuleContext};

const MIN_MESSAGE: &str = "Please enter a value greater than or equal to {0}.";
const MAX_MESSAGE: &str = "Please enter a value less than or equal to {0}.";
const RANGE_MESSAGE: &str = "Please enter a value between {0} and {1}.";
const STEP_MESSAGE: &str = "Please enter a multiple of {0}.";

/// `min`: value >= parameter.
pub struct Min;

impl Rule for Min {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let bound = param_number(ctx.param)?;
        let value = coerce_number(ctx.value)?;
        if value >= bound {
            return None;
        }
        Some(ctx.message(MIN_MESSAGE, &[&display_param(ctx.param)]))
    }
}

/// `max`: value <= parameter.
pub struct Max;

impl Rule for Max {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let bound = param_number(ctx.param)?;
        let value = coerce_number(ctx.value)?;
        if value <= bound {
            return None;
        }
        Some(ctx.message(MAX_MESSAGE, &[&display_param(ctx.param)]))
    }
}

/// `range`: `[min, max]` inclusive.
pub struct Range;

impl Rule for Range {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let (lo, hi) = param_bounds(ctx.param)?;
        let value = coerce_number(ctx.value)?;
        if value >= lo && value <= hi {
            return None;
        }
        let bounds = ctx.param.as_array()?;
        Some(ctx.message(
            RANGE_MESSAGE,
            &[&display_param(&bounds[0]), &display_param(&bounds[1])],
        ))
    }
}

/// `step`: the value must sit on the grid of multiples of the parameter.
pub struct Step;

impl Rule for Step {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let step = param_number(ctx.param).filter(|s| *s > 0.0)?;
        let value = coerce_number(ctx.value)?;
        let ratio = value / step;
        // Float grid check with a relative tolerance.
        if (ratio - ratio.round()).abs() < 1e-9 {
            return None;
        }
        Some(ctx.message(STEP_MESSAGE, &[&display_param(ctx.param)]))
    }
}
