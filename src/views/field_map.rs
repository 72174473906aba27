use super::heading;
use agriscan_common::demo::NDVI_AVERAGE;
use agriscan_common::{FieldMapModel, Overlay, SessionState};
use std::fmt::Write;

pub fn render(state: &SessionState, model: &FieldMapModel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", heading(&format!("{} - {}", state.t("map"), model.field_name)));

    let tabs: Vec<String> = model
        .tabs
        .iter()
        .map(|tab| {
            if tab.active {
                format!("[{}]", tab.name)
            } else {
                format!(" {} ", tab.name)
            }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join(" "));

    if let Some(url) = &model.image_url {
        let _ = writeln!(out, "🖼  {}", url);
    }

    match model.overlay {
        Overlay::Plain => {}
        Overlay::Ndvi(zones) => {
            for zone in zones {
                let _ = writeln!(
                    out,
                    "  {:<7} NDVI {:.2}  {}",
                    zone.name, zone.ndvi, zone.health
                );
            }
            let _ = writeln!(out, "  Avg NDVI {:.2}", NDVI_AVERAGE);
        }
        Overlay::Pests(pests) => {
            for pest in pests {
                let _ = writeln!(
                    out,
                    "  🐛 {} ({}, {}) {:.0}%\n     {}",
                    pest.kind,
                    pest.location,
                    pest.severity,
                    pest.confidence * 100.0,
                    pest.recommendation
                );
            }
        }
    }

    out
}
