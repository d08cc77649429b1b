//! Handlebars rendering for task command templates.
//!
//! Commands may reference the execution date (`{{ds}}`), date arithmetic
//! (`{{ds_add ds 7}}`), and the task's resolved parameters
//! (`{{params.my_param}}`). Loops use `{{#each (range n)}}` with the loop
//! counter bound to `{{this}}`.

use chrono::{Duration, NaiveDate};
use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;

use crate::error::DagError;
use crate::params::Params;

/// Date format used for `ds` and the `ds_add` helper.
const DS_FORMAT: &str = "%Y-%m-%d";

/// Data exposed to command templates.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    /// Execution date, rendered as `YYYY-MM-DD` under the `ds` key.
    pub ds: NaiveDate,
    /// Resolved parameters, addressable as `params.<key>`.
    pub params: Params,
}

impl TemplateContext {
    #[must_use]
    pub fn new(ds: NaiveDate, params: Params) -> Self {
        Self { ds, params }
    }
}

/// Renders one command template against the given context.
///
/// Rendering is stateless: each call builds a fresh engine with the
/// `ds_add` and `range` helpers registered. Unknown variables render as
/// empty strings rather than failing the declaration.
pub fn render_command(template: &str, context: &TemplateContext) -> Result<String, DagError> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(false);
    register_helpers(&mut handlebars);

    Ok(handlebars.render_template(template, context)?)
}

fn register_helpers(hb: &mut Handlebars<'_>) {
    handlebars_helper!(ds_add: |ds: str, days: i64| {
        NaiveDate::parse_from_str(ds, DS_FORMAT)
            .ok()
            .and_then(|date| {
                Duration::try_days(days).and_then(|delta| date.checked_add_signed(delta))
            })
            .map_or_else(|| ds.to_string(), |date| date.format(DS_FORMAT).to_string())
    });

    handlebars_helper!(range: |n: u64| {
        (0..n).collect::<Vec<u64>>()
    });

    hb.register_helper("ds_add", Box::new(ds_add));
    hb.register_helper("range", Box::new(range));
}
