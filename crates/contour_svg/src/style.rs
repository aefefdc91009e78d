//! usvg paint conversion to packed record colors

/// Pack a usvg color as `0xRRGGBB`
pub fn pack_color(color: usvg::Color) -> u32 {
    ((color.red as u32) << 16) | ((color.green as u32) << 8) | color.blue as u32
}

/// Convert a usvg Paint to a packed solid color.
///
/// Gradients collapse to their first stop; patterns have no solid
/// equivalent and come back as transparent.
pub fn paint_to_packed(paint: &usvg::Paint) -> Option<u32> {
    match paint {
        usvg::Paint::Color(color) => Some(pack_color(*color)),
        usvg::Paint::LinearGradient(lg) => lg.stops().first().map(|s| pack_color(s.color())),
        usvg::Paint::RadialGradient(rg) => rg.stops().first().map(|s| pack_color(s.color())),
        usvg::Paint::Pattern(_) => {
            tracing::debug!("pattern paint treated as transparent");
            None
        }
    }
}

/// Convert a usvg Fill to a packed color and its opacity
pub fn fill_to_packed(fill: Option<&usvg::Fill>) -> (Option<u32>, f32) {
    match fill {
        Some(fill) => (paint_to_packed(fill.paint()), fill.opacity().get()),
        None => (None, 1.0),
    }
}

/// Convert a usvg Stroke to a packed color and its (untransformed) width
pub fn stroke_to_packed(stroke: Option<&usvg::Stroke>) -> (Option<u32>, f32) {
    match stroke {
        Some(stroke) => (paint_to_packed(stroke.paint()), stroke.width().get()),
        None => (None, 1.0),
    }
}
