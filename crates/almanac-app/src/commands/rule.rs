use almanac_cal::RepeatRule;
use anyhow::Result;

pub fn run(text: &str) -> Result<()> {
    let rule = RepeatRule::validate(text)?;
    tracing::debug!(?rule, "Classified rule");
    println!("{rule}");
    Ok(())
}
