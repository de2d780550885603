//! Guess command - classify a single name

use anyhow::Result;
use console::style;
use ngender::request::{handle, ApiEnvelope, GuessRequest, GuessResponse};
use ngender::{share, Classifier, Gender, Mode};

/// Run the guess command; returns false when the name was rejected
pub fn run(
    classifier: &Classifier,
    name: Option<&str>,
    share_token: Option<&str>,
    mode: Mode,
    nolimit: bool,
    format: &str,
) -> Result<bool> {
    let request = match share_token {
        // Shared links always use the default length rule
        Some(token) => {
            let code = mode.code().to_string();
            let decoded = share::decode(token, Some(&code));
            GuessRequest::new(decoded.name, decoded.mode, false)
        }
        None => GuessRequest::new(name.unwrap_or_default(), mode, nolimit),
    };

    let result = handle(classifier, &request);
    let ok = result.is_ok();

    if format == "json" {
        let envelope = ApiEnvelope::from_result(result);
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        match result {
            Ok(response) => print_text(&response),
            Err(e) => eprintln!("{} {}", style("✗").red(), e),
        }
    }

    Ok(ok)
}

fn print_text(response: &GuessResponse) {
    let gender = match response.gender {
        Gender::Male => style(response.gender_cn).blue().bold(),
        Gender::Female => style(response.gender_cn).magenta().bold(),
    };

    println!("Name:        {}", style(&response.name).bold());
    println!(
        "Gender:      {} {}",
        gender,
        style(format!("({})", response.gender)).dim()
    );
    println!("Probability: {}", response.probability);
    println!("Mode:        {}", response.mode_label);
    println!("{}", style(&response.fun_tip).yellow());
}
