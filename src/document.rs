//! Automation document content: what a stale `aws:executeScript` step looks
//! like and how it is brought up to date.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::RuntimeFilter;

const EXECUTE_SCRIPT: &str = "aws:executeScript";

#[derive(Debug)]
pub enum DocumentError {
    Empty,
    InvalidJson(serde_json::Error),
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::Empty => write!(f, "document has no content"),
            DocumentError::InvalidJson(e) => write!(f, "document content is not valid JSON: {}", e),
        }
    }
}

impl std::error::Error for DocumentError {}

#[derive(Deserialize)]
struct AutomationContent {
    #[serde(rename = "mainSteps", default)]
    main_steps: Vec<Value>,
}

#[derive(Deserialize)]
struct ScriptStep {
    #[serde(default)]
    name: Option<String>,
    action: String,
    inputs: ScriptInputs,
}

#[derive(Deserialize)]
struct ScriptInputs {
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
}

fn parse(content: &str) -> Result<Value, DocumentError> {
    if content.trim().is_empty() {
        return Err(DocumentError::Empty);
    }
    serde_json::from_str(content).map_err(DocumentError::InvalidJson)
}

/// The stand-in content used when documents are not fetched from the
/// provider: one script step pinned to `old_runtime`.
pub fn placeholder_document(name: &str, old_runtime: &str) -> String {
    json!({
        "schemaVersion": "0.3",
        "description": format!("Automation document {}", name),
        "mainSteps": [{
            "name": "runScript",
            "action": EXECUTE_SCRIPT,
            "inputs": {
                "Runtime": old_runtime,
                "Handler": "script_handler",
                "Script": "def script_handler(events, context):\n    return {}"
            }
        }]
    })
    .to_string()
}

/// Name of the first `aws:executeScript` step running an outdated runtime,
/// with the runtime itself.
pub fn outdated_step(content: &str, outdated: &RuntimeFilter) -> Result<Option<(String, String)>, DocumentError> {
    let doc: AutomationContent = match serde_json::from_value(parse(content)?) {
        Ok(doc) => doc,
        // Not an automation layout at all.
        Err(_) => return Ok(None),
    };
    let found = doc
        .main_steps
        .into_iter()
        .filter_map(|step| serde_json::from_value::<ScriptStep>(step).ok())
        .filter(|step| step.action == EXECUTE_SCRIPT)
        .find_map(|step| {
            let runtime = step.inputs.runtime?;
            outdated
                .matches(&runtime)
                .then(|| (step.name.unwrap_or_else(|| String::from("UnnamedStep")), runtime))
        });
    Ok(found)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub content: String,
    pub steps_rewritten: usize,
}

/// Sets every outdated `aws:executeScript` runtime to `target`. Other
/// fields are carried through untouched.
pub fn rewrite_runtime(content: &str, outdated: &RuntimeFilter, target: &str) -> Result<Rewritten, DocumentError> {
    let mut doc = parse(content)?;
    let mut steps_rewritten = 0;
    if let Some(steps) = doc.get_mut("mainSteps").and_then(Value::as_array_mut) {
        for step in steps {
            if step.get("action").and_then(Value::as_str) != Some(EXECUTE_SCRIPT) {
                continue;
            }
            let Some(runtime) = step.pointer_mut("/inputs/Runtime") else {
                continue;
            };
            if runtime.as_str().is_some_and(|rt| outdated.matches(rt)) {
                *runtime = Value::String(target.to_string());
                steps_rewritten += 1;
            }
        }
    }
    Ok(Rewritten {
        content: doc.to_string(),
        steps_rewritten,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_outdated_until_rewritten() {
        let filter = RuntimeFilter::default();
        let content = placeholder_document("RotateKeys", "python3.8");
        assert_eq!(
            outdated_step(&content, &filter).unwrap(),
            Some((String::from("runScript"), String::from("python3.8")))
        );

        let rewritten = rewrite_runtime(&content, &filter, "python3.12").unwrap();
        assert_eq!(rewritten.steps_rewritten, 1);
        assert_eq!(outdated_step(&rewritten.content, &filter).unwrap(), None);

        let value: Value = serde_json::from_str(&rewritten.content).unwrap();
        assert_eq!(value["mainSteps"][0]["inputs"]["Runtime"], "python3.12");
        assert_eq!(value["mainSteps"][0]["inputs"]["Handler"], "script_handler");
    }

    #[test]
    fn only_execute_script_steps_with_outdated_runtimes_change() {
        let content = json!({
            "schemaVersion": "0.3",
            "mainSteps": [
                { "name": "sleep", "action": "aws:sleep", "inputs": { "Duration": "PT1M" } },
                { "name": "current", "action": "aws:executeScript", "inputs": { "Runtime": "python3.11" } },
                { "name": "legacy", "action": "aws:executeScript", "inputs": { "Runtime": "python2.7" } },
                { "name": "other", "action": "aws:runCommand", "inputs": { "Runtime": "python3.8" } }
            ]
        })
        .to_string();
        let filter = RuntimeFilter::default();

        assert_eq!(
            outdated_step(&content, &filter).unwrap(),
            Some((String::from("legacy"), String::from("python2.7")))
        );
        let rewritten = rewrite_runtime(&content, &filter, "python3.12").unwrap();
        assert_eq!(rewritten.steps_rewritten, 1);
        let value: Value = serde_json::from_str(&rewritten.content).unwrap();
        assert_eq!(value["mainSteps"][1]["inputs"]["Runtime"], "python3.11");
        assert_eq!(value["mainSteps"][2]["inputs"]["Runtime"], "python3.12");
        assert_eq!(value["mainSteps"][3]["inputs"]["Runtime"], "python3.8");
    }

    #[test]
    fn documents_without_steps_are_current() {
        let filter = RuntimeFilter::default();
        assert_eq!(outdated_step(r#"{"schemaVersion":"2.2"}"#, &filter).unwrap(), None);
        assert_eq!(outdated_step(r#"["not", "a", "document"]"#, &filter).unwrap(), None);
        let rewritten = rewrite_runtime(r#"{"schemaVersion":"2.2"}"#, &filter, "python3.12").unwrap();
        assert_eq!(rewritten.steps_rewritten, 0);
    }

    #[test]
    fn bad_content_is_reported() {
        let filter = RuntimeFilter::default();
        assert!(matches!(outdated_step("   ", &filter), Err(DocumentError::Empty)));
        assert!(matches!(
            rewrite_runtime("schemaVersion: '0.3'", &filter, "python3.12"),
            Err(DocumentError::InvalidJson(_))
        ));
    }
}
