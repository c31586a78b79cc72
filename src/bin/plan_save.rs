//! Inspect the draw plan for a save payload.
//!
//! Reads an editing-surface save payload from a JSON file and prints the
//! page-space drawing instructions that would be handed to the document
//! library, without touching any document.
//!
//! Usage:
//!   cargo run --bin plan_save -- payload.json
//!   cargo run --bin plan_save -- payload.json --page-size 595x842

use pdf_retouch::save::{plan_save, SavePayload};
use std::fs;
use std::process;

struct PlanConfig {
    payload_path: String,
    page_width: f32,
    page_height: f32,
}

impl PlanConfig {
    fn from_args() -> Option<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut payload_path = None;
        // US Letter unless told otherwise
        let mut page_width = 612.0;
        let mut page_height = 792.0;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--page-size" => {
                    i += 1;
                    let spec = args.get(i)?;
                    let (w, h) = spec.split_once('x')?;
                    page_width = w.parse().ok()?;
                    page_height = h.parse().ok()?;
                },
                path => payload_path = Some(path.to_string()),
            }
            i += 1;
        }

        Some(Self {
            payload_path: payload_path?,
            page_width,
            page_height,
        })
    }
}

fn main() {
    env_logger::init();

    let Some(config) = PlanConfig::from_args() else {
        eprintln!("Usage: plan_save <payload.json> [--page-size WxH]");
        process::exit(2);
    };

    let raw = match fs::read_to_string(&config.payload_path) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("Error reading {}: {}", config.payload_path, err);
            process::exit(1);
        },
    };

    let payload: SavePayload = match serde_json::from_str(&raw) {
        Ok(payload) => payload,
        Err(err) => {
            eprintln!("Invalid payload: {}", err);
            process::exit(1);
        },
    };

    match plan_save(&payload, |_| Some((config.page_width, config.page_height))) {
        Ok(plans) => {
            let out = serde_json::to_string_pretty(&plans).unwrap_or_default();
            println!("{}", out);
        },
        Err(err) => {
            eprintln!("Planning failed: {}", err);
            process::exit(1);
        },
    }
}
