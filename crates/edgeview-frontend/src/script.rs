//! Scripted event replay.
//!
//! A script is a comma-separated list of steps, each an event name with an
//! optional `=value`:
//!
//! ```text
//! toggle-light,line-thickness=2.5,line-colors=#ff0000,add-primitive=torus,orbit=30
//! ```

use std::path::PathBuf;

use edgeview_core::{Color, PrimitiveKind};
use edgeview_renderer::Event;

/// One step of a script
#[derive(Debug, Clone)]
pub enum ScriptStep {
    /// Dispatch an event directly
    Dispatch(Event),
    /// Orbit the view control by the given angle in degrees
    Orbit(f32),
    /// Move the view control away from its target by the given distance
    Dolly(f32),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScriptError {
    #[error("unknown script step '{0}'")]
    UnknownStep(String),
    #[error("'{0}' needs a value")]
    MissingValue(String),
    #[error("'{step}' does not take a value")]
    UnexpectedValue { step: String },
    #[error("invalid value '{value}' for '{step}': {reason}")]
    InvalidValue {
        step: String,
        value: String,
        reason: String,
    },
}

fn invalid(step: &str, value: &str, reason: impl ToString) -> ScriptError {
    ScriptError::InvalidValue {
        step: step.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_number(step: &str, value: &str) -> Result<f32, ScriptError> {
    let number: f32 = value.parse().map_err(|e| invalid(step, value, e))?;
    if !number.is_finite() {
        return Err(invalid(step, value, "not a finite number"));
    }
    Ok(number)
}

/// Parse a single `name[=value]` step
pub fn parse_step(text: &str) -> Result<ScriptStep, ScriptError> {
    let (name, value) = match text.split_once('=') {
        Some((name, value)) => (name.trim(), Some(value.trim())),
        None => (text.trim(), None),
    };

    let simple = |event: Event| match value {
        Some(_) => Err(ScriptError::UnexpectedValue {
            step: name.to_string(),
        }),
        None => Ok(ScriptStep::Dispatch(event)),
    };
    let required = || value.ok_or_else(|| ScriptError::MissingValue(name.to_string()));

    match name {
        "toggle-opacity" => simple(Event::ToggleOpacity),
        "toggle-light" => simple(Event::ToggleLight),
        "toggle-thick-lines" => simple(Event::ToggleThickLines),
        "next-model" => simple(Event::NextModel),
        "previous-model" => simple(Event::PreviousModel),
        "render" => simple(Event::Render),
        "line-thickness" => {
            let value = required()?;
            let thickness = parse_number(name, value)?;
            if thickness <= 0.0 {
                return Err(invalid(name, value, "must be positive"));
            }
            Ok(ScriptStep::Dispatch(Event::LineThickness(thickness)))
        }
        "line-colors" => {
            let value = required()?;
            let color: Color = value.parse().map_err(|e| invalid(name, value, e))?;
            Ok(ScriptStep::Dispatch(Event::LineColors(color)))
        }
        "add-primitive" => {
            let value = required()?;
            let kind: PrimitiveKind = value.parse().map_err(|e| invalid(name, value, e))?;
            Ok(ScriptStep::Dispatch(Event::AddPrimitive(kind)))
        }
        "load-model" => {
            let value = required()?;
            Ok(ScriptStep::Dispatch(Event::LoadModel {
                path: PathBuf::from(value),
            }))
        }
        "orbit" => Ok(ScriptStep::Orbit(parse_number(name, required()?)?)),
        "dolly" => Ok(ScriptStep::Dolly(parse_number(name, required()?)?)),
        other => Err(ScriptError::UnknownStep(other.to_string())),
    }
}

/// Parse a whole script; empty steps are skipped
pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    script
        .split(',')
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(parse_step)
        .collect()
}
