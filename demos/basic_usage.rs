//! Score one flow built in code and one parsed from a step log.
//!
//! Run with: cargo run --example basic_usage

use ease::{Flow, Step, TranscriptParser, UiPattern, evaluate};

fn main() -> anyhow::Result<()> {
    let flow = Flow::new("Change the profile photo")
        .step(Step::new("Tap the avatar", UiPattern::Navigation))
        .step(Step::new("Long press the photo", UiPattern::Other).ambiguous())
        .step(Step::new("Pick a new photo", UiPattern::Selection))
        .step(Step::new("Tap Save", UiPattern::Confirmation));

    let verdict = evaluate(&flow)?;
    println!("{}", verdict.to_json_pretty()?);

    let log = "To send an email:\n\
               1. Click on the \"New Email\" button.\n\
               2. Enter the recipient's email address in the \"To\" field.\n\
               3. Type your message in the body of the email.\n\
               4. Click on the \"Send\" button.";
    let parsed = TranscriptParser::default().parse(log)?;
    println!("Parsed goal: {}", parsed.goal);
    println!("{}", evaluate(&parsed)?.to_json_pretty()?);

    Ok(())
}
