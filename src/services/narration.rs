use crate::constants::NARRATION_CHUNK_MAX_CHARS;
use crate::error::{AppError, Result};
use crate::models::{Itinerary, Place};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrationRequest {
    pub itinerary: Itinerary,
    /// Narrate one place; the whole tour introduction when absent
    #[serde(default)]
    pub place_id: Option<String>,
}

/// Text for the browser speech engine, pre-split into utterances.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Narration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    pub text: String,
    pub chunks: Vec<String>,
}

pub fn narrate(request: &NarrationRequest) -> Result<Narration> {
    let text = match request.place_id.as_deref() {
        Some(id) => {
            let place = request.itinerary.place(id).ok_or_else(|| {
                AppError::NotFound(format!("place '{}' is not part of the tour", id))
            })?;
            place_script(place)
        }
        None => tour_introduction(&request.itinerary),
    };

    Ok(Narration {
        place_id: request.place_id.clone(),
        chunks: split_into_chunks(&text, NARRATION_CHUNK_MAX_CHARS),
        text,
    })
}

pub fn place_script(place: &Place) -> String {
    let mut script = format!("Welcome to {}! {}", place.name, place.description.trim());

    if !place.historical_facts.is_empty() {
        script.push_str(" Did you know? ");
        script.push_str(&place.historical_facts.join(" "));
    }
    if let Some(best) = place.best_time_to_visit.as_deref() {
        script.push_str(&format!(" The best time to visit is {}.", best.trim_end_matches('.')));
    }
    if !place.highlights.is_empty() {
        script.push_str(&format!(
            " Key highlights include: {}.",
            place.highlights.join(", ")
        ));
    }

    script
}

pub fn tour_introduction(itinerary: &Itinerary) -> String {
    let hours = itinerary.total_duration / 60;
    let minutes = itinerary.total_duration % 60;
    let length = match (hours, minutes) {
        (0, m) => format!("{} minutes", m),
        (1, 0) => "1 hour".to_string(),
        (h, 0) => format!("{} hours", h),
        (h, m) => format!("{} hours and {} minutes", h, m),
    };

    let stops = match itinerary.places.as_slice() {
        [] => String::new(),
        [only] => only.name.clone(),
        [init @ .., last] => format!(
            "{} and {}",
            init.iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            last.name
        ),
    };

    let mut intro = format!(
        "Welcome to {}. This {} tour takes about {} and visits {} {}: {}.",
        itinerary.title,
        itinerary.transport_mode,
        length,
        itinerary.places.len(),
        if itinerary.places.len() == 1 { "place" } else { "places" },
        stops
    );
    if !itinerary.notes.trim().is_empty() {
        intro.push(' ');
        intro.push_str(itinerary.notes.trim());
    }
    intro
}

/// Split text on whitespace into chunks of at most `max_chars` characters.
/// A single word longer than the limit is cut at character boundaries.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
