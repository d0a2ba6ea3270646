use std::path::Path;

use serde::Serialize;
use serviceapp_core::backend::RecordingBackend;
use serviceapp_core::error::ServiceAppError;
use serviceapp_core::fields::{build_fields, ConfigField, FieldValue};
use serviceapp_core::propagator;
use serviceapp_core::{DetectionResult, PlayerKind, SystemPaths};
use serviceapp_detect::KnownPlayer;

use crate::session::Session;

/// One line of `serviceapp detect` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerReport {
    pub player: PlayerKind,
    pub binary: String,
    pub binary_present: bool,
    pub version: Option<String>,
}

pub fn player_reports(detection: &DetectionResult, paths: &SystemPaths) -> Vec<PlayerReport> {
    detection
        .iter()
        .map(|(player, version)| {
            let known = KnownPlayer::for_kind(player);
            PlayerReport {
                player,
                binary: known.binary_path(paths).display().to_string(),
                binary_present: known.is_installed(paths),
                version: version.map(str::to_string),
            }
        })
        .collect()
}

pub async fn detect(config: Option<&Path>, json: bool) -> Result<(), ServiceAppError> {
    let session = Session::open(config)?;
    let detection = session.detect().await;
    let reports = player_reports(&detection, &session.config.paths);

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }
    for r in &reports {
        match &r.version {
            Some(v) => println!("{:<12} {v}", r.player.to_string()),
            None if r.binary_present => println!(
                "{:<12} not installed (no version from {})",
                r.player.to_string(),
                r.binary
            ),
            None => println!("{:<12} not installed", r.player.to_string()),
        }
    }
    Ok(())
}

fn format_field(field: &ConfigField) -> String {
    match &field.value {
        FieldValue::Spacer => String::new(),
        FieldValue::Header if field.description.is_empty() => field.label.clone(),
        FieldValue::Header => format!("{} - {}", field.label, field.description),
        FieldValue::Toggle { value } => {
            format!("{:<40} {}", field.label, if *value { "yes" } else { "no" })
        }
        FieldValue::Choice { selected, choices } => {
            format!("{:<40} {selected} [{}]", field.label, choices.join("|"))
        }
        FieldValue::Integer { value, min, max } => {
            format!("{:<40} {value} ({min}..={max})", field.label)
        }
    }
}

pub async fn fields(config: Option<&Path>, json: bool) -> Result<(), ServiceAppError> {
    let session = Session::open(config)?;
    let detection = session.detect().await;
    let fields = build_fields(&session.config, &detection, &session.sinks, session.flag.get());

    if json {
        println!("{}", serde_json::to_string_pretty(&fields)?);
        return Ok(());
    }
    for field in &fields {
        println!("{}", format_field(field));
    }
    Ok(())
}

pub fn apply(config: Option<&Path>, user: bool, json: bool) -> Result<(), ServiceAppError> {
    let session = Session::open(config)?;
    let mut backend = RecordingBackend::new();
    if user {
        propagator::apply_user_settings(&mut backend, &session.config.user)?;
    } else {
        propagator::apply_config(&mut backend, &session.config)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(backend.calls())?);
    } else {
        for call in backend.calls() {
            println!("{call}");
        }
    }
    Ok(())
}

pub fn replace(config: Option<&Path>, state: Option<bool>) -> Result<(), ServiceAppError> {
    let session = Session::open(config)?;
    if let Some(replaced) = state {
        session.flag.set(replaced)?;
    }
    let label = if session.flag.get() { "serviceapp" } else { "original" };
    println!("{label} ({})", session.flag.path().display());
    Ok(())
}

pub fn confirm(config: Option<&Path>, replace: bool) -> Result<(), ServiceAppError> {
    let session = Session::open(config)?;
    let mut backend = RecordingBackend::new();
    let outcome = propagator::confirm(&mut backend, &session.config, &session.flag, replace)?;
    session.save()?;

    println!("{} backend calls issued", outcome.calls_issued);
    if outcome.restart_required {
        println!("Enigma2 playback system changed, restart Enigma2 to apply");
    }
    Ok(())
}
