//! Length bound rules: minlength, maxlength, rangelength
//!
//! Length is measured in characters for strings and items for arrays;
//! other value types have no length and pass.

use crate::rules::builtin::{param_bounds, param_number, value_length};
use crate::rules::message::display_param;
use crate::rules::{Rule, RuleContext};

const MIN_LENGTH_MESSAGE: &str = "Please enter at least {0} characters.";
const MAX_LENGTH_MESSAGE: &str = "Please enter no more than {0} characters.";
const RANGE_LENGTH_MESSAGE: &str = "Please enter a value between {0} and {1} characters long.";

/// `minlength`: length >= parameter.
pub struct MinLength;

impl Rule for MinLength {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let bound = param_number(ctx.param)?;
        let length = value_length(ctx.value)? as f64;
        if length >= bound {
            return None;
        }
        Some(ctx.message(MIN_LENGTH_MESSAGE, &[&display_param(ctx.param)]))
    }
}

/// `maxlength`: length <= parameter.
pub struct MaxLength;

impl Rule for MaxLength {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let bound = param_number(ctx.param)?;
        let length = value_length(ctx.value)? as f64;
        if length <= bound {
            return None;
        }
        Some(ctx.message(MAX_LENGTH_MESSAGE, &[&display_param(ctx.param)]))
    }
}

/// `rangelength`: `[min, max]` inclusive on length.
pub struct RangeLength;

impl Rule for RangeLength {
    fn validate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let (lo, hi) = param_bounds(ctx.param)?;
        let length = value_length(ctx.value)? as f64;
        if length >= lo && length <= hi {
            return None;
        }
        let bounds = ctx.param.as_array()?;
        Some(ctx.message(
            RANGE_LENGTH_MESSAGE,
            &[&display_param(&bounds[0]), &display_param(&bounds[1])],
        ))
    }
}
