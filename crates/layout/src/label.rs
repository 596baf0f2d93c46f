//! Text textures that remember what they show.

use blok_gfx::{GfxError, GraphicsContext, Texture};

use crate::types::Rgb;

/// A rendered string plus the string itself.
///
/// `replace` always re-renders; `refresh` only does so when the text changed.
#[derive(Debug)]
pub struct CachedLabel<T> {
    text: String,
    texture: T,
}

impl<T: Texture> CachedLabel<T> {
    pub fn render<G>(
        gcx: &mut G,
        font: &G::Font,
        text: impl Into<String>,
        color: Rgb,
    ) -> Result<Self, GfxError>
    where
        G: GraphicsContext<Texture = T>,
    {
        let text = text.into();
        let texture = gcx.render_text(font, &text, color)?;
        Ok(Self { text, texture })
    }

    pub fn replace<G>(
        &mut self,
        gcx: &mut G,
        font: &G::Font,
        text: impl Into<String>,
        color: Rgb,
    ) -> Result<(), GfxError>
    where
        G: GraphicsContext<Texture = T>,
    {
        let text = text.into();
        self.texture = gcx.render_text(font, &text, color)?;
        self.text = text;
        Ok(())
    }

    /// Re-render only if `text` differs from the cached text.
    ///
    /// Returns whether a new texture was rendered.
    pub fn refresh<G>(
        &mut self,
        gcx: &mut G,
        font: &G::Font,
        text: &str,
        color: Rgb,
    ) -> Result<bool, GfxError>
    where
        G: GraphicsContext<Texture = T>,
    {
        if self.text == text {
            return Ok(false);
        }
        self.replace(gcx, font, text, color)?;
        Ok(true)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn texture(&self) -> &T {
        &self.texture
    }

    pub fn width(&self) -> i32 {
        self.texture.width()
    }

    pub fn height(&self) -> i32 {
        self.texture.height()
    }

    pub fn draw<G>(&self, gcx: &mut G, x: i32, y: i32) -> Result<(), GfxError>
    where
        G: GraphicsContext<Texture = T>,
    {
        gcx.draw_texture(&self.texture, x, y)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use blok_gfx::TermContext;

    use super::*;

    #[test]
    fn refresh_skips_identical_text() {
        let mut gcx = TermContext::new(40, 10);
        let font = gcx.load_font(Path::new("f.ttf"), 30).unwrap();
        let white = Rgb::new(255, 255, 255);

        let mut label = CachedLabel::render(&mut gcx, &font, "00:00", white).unwrap();
        assert_eq!(gcx.text_render_count(), 1);

        assert!(!label.refresh(&mut gcx, &font, "00:00", white).unwrap());
        assert_eq!(gcx.text_render_count(), 1);

        assert!(label.refresh(&mut gcx, &font, "00:01", white).unwrap());
        assert_eq!(gcx.text_render_count(), 2);
        assert_eq!(label.text(), "00:01");
    }

    #[test]
    fn replace_always_renders() {
        let mut gcx = TermContext::new(40, 10);
        let font = gcx.load_font(Path::new("f.ttf"), 30).unwrap();
        let white = Rgb::new(255, 255, 255);

        let mut label = CachedLabel::render(&mut gcx, &font, "7", white).unwrap();
        label.replace(&mut gcx, &font, "7", white).unwrap();
        assert_eq!(gcx.text_render_count(), 2);
    }
}
