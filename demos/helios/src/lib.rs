use wasm_bindgen::prelude::*;

mod bodies;
mod camera_rig;
mod game;
mod gesture;
mod orbit;
mod settings;
mod view_state;
use game::Helios;

helios_web::export_game!(Helios, "helios");

/// Planet registry as JSON, for the HUD's info panels.
#[wasm_bindgen]
pub fn get_planet_catalog() -> String {
    bodies::catalog_json().unwrap_or_else(|err| {
        log::error!("planet catalog could not be serialized: {err}");
        String::from("[]")
    })
}
