//! Prompts for the bill extraction pipeline.

/// Instruction sent alongside an uploaded bill image.
pub const TRANSCRIBE_IMAGE_PROMPT: &str =
    "Extract all text content from this electricity bill image.";

/// Prompt for turning raw bill text into the fixed JSON shape.
///
/// `{text}` is replaced with the extracted bill text.
pub const EXTRACT_FIELDS_PROMPT: &str = r#"Extract this text into JSON:
{
  "consumerName": "",
  "billNumber": "",
  "billingDate": "",
  "billingMonth": "",
  "unitsConsumed": 0,
  "totalAmount": 0,
  "address": "",
  "tariffType": ""
}
Here is the text:
{text}"#;

/// Prompt for short insights over recent monthly usage.
///
/// `{usage}` is replaced with newline-joined "<month>: <emission> kg CO2" lines.
pub const INSIGHTS_PROMPT: &str = r#"Analyze the following monthly carbon usage:
{usage}
Give short insights and 3 actionable suggestions to reduce electricity-based emissions."#;
