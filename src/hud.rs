//! Text overlays drawn over the canvas
//!
//! The score line and the end-of-game message are DOM elements layered on
//! top of the canvas; the strings themselves are plain functions so they can
//! be checked without a browser.

use crate::sim::Scene;

/// Score overlay text
pub fn score_text(score: u64) -> String {
    format!("Score: {}", score)
}

/// End-of-game overlay text
pub fn game_over_text(score: u64) -> String {
    format!(
        "You got Covid-19\nso now you need rest!\n\nYour score: {}\n\nPress SPACE to restart game!",
        score
    )
}

/// What the overlays should show for a scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudView {
    pub score: String,
    /// `None` hides the message overlay
    pub message: Option<String>,
}

impl HudView {
    pub fn of(scene: &Scene) -> Self {
        Self {
            score: score_text(scene.score),
            message: scene.is_game_over().then(|| game_over_text(scene.score)),
        }
    }
}

/// Inline style with the display toggle swapped for the requested visibility
pub fn message_style(current: &str, visible: bool) -> String {
    let base = current
        .replace("display:none;", "")
        .replace("display:block;", "");
    let display = if visible { "block" } else { "none" };
    format!("{}display:{};", base, display)
}

/// DOM overlay elements, positioned over the canvas inside the mount point
#[cfg(target_arch = "wasm32")]
pub struct Hud {
    score_el: web_sys::Element,
    message_el: web_sys::Element,
    last: Option<HudView>,
}

#[cfg(target_arch = "wasm32")]
impl Hud {
    /// Create both overlays inside `container`
    pub fn mount(
        document: &web_sys::Document,
        container: &web_sys::Element,
    ) -> Result<Self, wasm_bindgen::JsValue> {
        let score_el = document.create_element("div")?;
        score_el.set_id("score-text");
        score_el.set_attribute(
            "style",
            "position:absolute;left:16px;top:16px;color:#fff;font:16px monospace;pointer-events:none;",
        )?;
        container.append_child(&score_el)?;

        let message_el = document.create_element("div")?;
        message_el.set_id("info-text");
        message_el.set_attribute(
            "style",
            "position:absolute;left:200px;top:200px;color:#fff;font:50px Arial;white-space:pre-line;pointer-events:none;display:none;",
        )?;
        container.append_child(&message_el)?;

        Ok(Self {
            score_el,
            message_el,
            last: None,
        })
    }

    /// Refresh the overlays; the DOM is only touched when the text changes
    pub fn sync(&mut self, scene: &Scene) {
        let view = HudView::of(scene);
        if self.last.as_ref() == Some(&view) {
            return;
        }

        self.score_el.set_text_content(Some(&view.score));

        let style = message_style(
            &self.message_el.get_attribute("style").unwrap_or_default(),
            view.message.is_some(),
        );
        self.message_el.set_text_content(view.message.as_deref());
        if let Err(e) = self.message_el.set_attribute("style", &style) {
            log::warn!("Failed to update message overlay: {:?}", e);
        }

        self.last = Some(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SceneLayout, collect_star, hit_bomb};

    #[test]
    fn test_score_text() {
        assert_eq!(score_text(0), "Score: 0");
        assert_eq!(score_text(130), "Score: 130");
    }

    #[test]
    fn test_game_over_text_has_score() {
        let text = game_over_text(70);
        assert!(text.contains("Your score: 70"));
        assert!(text.ends_with("Press SPACE to restart game!"));
    }

    #[test]
    fn test_message_style_toggles_display() {
        let hidden = "left:200px;display:none;";
        let shown = message_style(hidden, true);
        assert_eq!(shown, "left:200px;display:block;");
        assert_eq!(message_style(&shown, false), hidden);
        // Repeated syncs never stack display rules
        assert_eq!(message_style(&shown, true), shown);
    }

    #[test]
    fn test_view_follows_scene() {
        let mut scene = Scene::create(SceneLayout::default(), 3);
        let view = HudView::of(&scene);
        assert_eq!(view.score, "Score: 0");
        assert_eq!(view.message, None);

        collect_star(&mut scene, 0);
        hit_bomb(&mut scene, 0);
        let view = HudView::of(&scene);
        assert_eq!(view.score, "Score: 10");
        assert_eq!(view.message, Some(game_over_text(10)));
    }
}
