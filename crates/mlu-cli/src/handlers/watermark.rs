//! Watermark command handler.

use anyhow::Result;
use mlu_core::{FactRequest, Watermark};

use crate::bootstrap::CliContext;

/// Build the request; no facts means the default set.
pub fn request_from_args(facts: &[String]) -> FactRequest {
    if facts.is_empty() {
        FactRequest::default()
    } else {
        FactRequest::new(facts)
    }
}

/// Render as aligned text or as a JSON object in report order.
pub fn render(watermark: &Watermark, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(&watermark.report)?)
    } else {
        Ok(watermark.text.clone())
    }
}

/// Execute the watermark command.
pub fn execute(ctx: &CliContext, facts: &[String], json: bool) -> Result<()> {
    let request = request_from_args(facts);
    let watermark = ctx.watermark_service().collect(&request);
    println!("{}", render(&watermark, json)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlu_core::{DEFAULT_FACTS, FactId, FactReport};

    #[test]
    fn test_empty_args_give_default_request() {
        let request = request_from_args(&[]);
        let expected: Vec<FactId> = DEFAULT_FACTS.iter().map(|f| FactId::from(*f)).collect();
        assert_eq!(request.ids(), expected.as_slice());
    }

    #[test]
    fn test_args_keep_order() {
        let request = request_from_args(&["torch".to_string(), "python".to_string()]);
        let ids: Vec<String> = request.ids().iter().map(ToString::to_string).collect();
        assert_eq!(ids, vec!["torch", "python"]);
    }

    #[test]
    fn test_render_json_keeps_order() {
        let report: FactReport = [("python", "3.11.4"), ("numpy", "1.26.4")]
            .into_iter()
            .collect();
        let watermark = Watermark {
            text: report.to_string(),
            report,
        };
        let json = render(&watermark, true).unwrap();
        assert!(json.find("python").unwrap() < json.find("numpy").unwrap());
        assert_eq!(render(&watermark, false).unwrap(), watermark.text);
    }
}
