//! Script evaluation against the embedded page.

use mapview_common::BridgeError;
use serde_json::Value;

/// Result of evaluating one script.
pub type ScriptOutcome = Result<Value, BridgeError>;

/// Receives the outcome of one evaluation.
pub type ScriptCallback = Box<dyn FnOnce(ScriptOutcome) + Send + 'static>;

/// Primitive for running script in the embedded page.
///
/// Implementations must invoke `callback` exactly once, also when the
/// evaluation could not be started.
pub trait ScriptEvaluator {
    fn evaluate(&self, script: &str, callback: ScriptCallback);

    /// Run a script without observing its result.
    fn execute(&self, script: &str) {
        self.evaluate(script, Box::new(|_| {}));
    }
}

/// Wrap `script` so that evaluation yields `{ok: value}` or `{error: message}`.
///
/// The source is passed through an indirect `eval` so statements and
/// expressions both work.
pub fn wrap_for_result(script: &str) -> String {
    let source = serde_json::to_string(script).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        "(function(){{try{{var r=(0,eval)({source});\
         return {{ok:r===undefined?null:r}};}}\
         catch(e){{return {{error:String(e&&e.message?e.message:e)}};}}}})()"
    )
}

/// Decode the JSON string a webview reports for a wrapped script.
///
/// Anything that is not an `{ok}` / `{error}` envelope is returned as a
/// plain string value.
pub fn parse_wrapped_result(raw: &str) -> ScriptOutcome {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(mut envelope)) => {
            if let Some(message) = envelope.remove("error") {
                let message = match message {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                return Err(BridgeError::Script(message));
            }
            match envelope.remove("ok") {
                Some(value) => Ok(value),
                None => Ok(Value::Object(envelope)),
            }
        }
        Ok(Value::Null) => Ok(Value::Null),
        _ => Ok(Value::String(raw.to_string())),
    }
}
