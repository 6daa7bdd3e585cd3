//! SVG and raster rendering of pixel grids.

use std::fmt::Write as _;

use crate::codec::{PixelGrid, GRID_SIZE};
use crate::error::CodecError;
use crate::palette::{self, Rgb, PALETTE};

/// Style injected into the root element so browsers keep pixels sharp.
const DISPLAY_STYLE: &str = "image-rendering: pixelated; image-rendering: -moz-crisp-edges; \
                             image-rendering: crisp-edges; display: block;";

/// Render a grid as SVG, one `rect` per pixel in a 16x16 view box.
///
/// `cell` is the displayed size of one pixel; it only affects the outer
/// `width`/`height`, coordinates stay in pixel units.
pub fn render_svg(grid: &PixelGrid, cell: usize) -> String {
    let size = GRID_SIZE.saturating_mul(cell);
    let mut svg = String::with_capacity(64 * grid.as_slice().len());
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {GRID_SIZE} {GRID_SIZE}" shape-rendering="crispEdges">"#
    );
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            let fill = PALETTE[grid.get(x, y) as usize].hex();
            let _ = write!(
                svg,
                r#"<rect x="{x}" y="{y}" width="1" height="1" fill="{fill}"/>"#
            );
        }
    }
    svg.push_str("</svg>");
    svg
}

/// Adapt token SVG for a fluid container.
///
/// The first numeric `width` and `height` attributes become `100%`, and
/// the root element gets crisp-edge rendering and centered aspect fitting.
pub fn prepare_svg_for_display(markup: &str) -> String {
    let markup = replace_first_numeric_attr(markup, "width", "100%");
    let markup = replace_first_numeric_attr(&markup, "height", "100%");
    markup.replacen(
        "<svg",
        &format!(r#"<svg style="{DISPLAY_STYLE}" preserveAspectRatio="xMidYMid meet""#),
        1,
    )
}

/// Replace the first `name="<digits>"` (either quote style) with `name="value"`.
fn replace_first_numeric_attr(markup: &str, name: &str, value: &str) -> String {
    let needle = format!("{name}=");
    for (start, _) in markup.match_indices(&needle) {
        let rest = &markup[start + needle.len()..];
        if !rest.starts_with(&['"', '\''][..]) {
            continue;
        }
        let digits = rest[1..].bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            continue;
        }
        let close = rest.as_bytes().get(1 + digits).copied();
        if close != Some(b'"') && close != Some(b'\'') {
            continue;
        }
        let end = start + needle.len() + digits + 2;
        return format!("{}{name}=\"{value}\"{}", &markup[..start], &markup[end..]);
    }
    markup.to_string()
}

/// Read a grid back from pixel-unit `rect` elements.
///
/// Pixels not covered by any rect stay at palette index 0. A rect may span
/// several cells (`width`/`height` default to 1). Every fill must be an
/// exact palette color.
pub fn grid_from_svg(markup: &str) -> Result<PixelGrid, CodecError> {
    let mut grid = PixelGrid::default();
    let mut rest = markup;
    while let Some(start) = rest.find("<rect") {
        let tag_body = &rest[start + "<rect".len()..];
        let end = tag_body
            .find('>')
            .ok_or_else(|| CodecError::Svg("unterminated rect element".into()))?;
        let attrs = parse_attributes(&tag_body[..end])?;
        paint_rect(&mut grid, &attrs)?;
        rest = &tag_body[end + 1..];
    }
    Ok(grid)
}

fn paint_rect(grid: &mut PixelGrid, attrs: &[(&str, &str)]) -> Result<(), CodecError> {
    let lookup = |name: &str| attrs.iter().find(|(k, _)| *k == name).map(|(_, v)| *v);
    let coord = |name: &str, default: usize| -> Result<usize, CodecError> {
        match lookup(name) {
            None => Ok(default),
            Some(v) => v
                .parse::<usize>()
                .map_err(|_| CodecError::Svg(format!("non-integer {name} '{v}'"))),
        }
    };

    let x = coord("x", 0)?;
    let y = coord("y", 0)?;
    let w = coord("width", 1)?;
    let h = coord("height", 1)?;
    if x >= GRID_SIZE || y >= GRID_SIZE || w > GRID_SIZE - x || h > GRID_SIZE - y {
        return Err(CodecError::Position(
            x.saturating_add(w.saturating_sub(1)),
            y.saturating_add(h.saturating_sub(1)),
        ));
    }

    let fill = lookup("fill").ok_or_else(|| CodecError::Svg("rect without fill".into()))?;
    let rgb = Rgb::parse_hex(fill)
        .ok_or_else(|| CodecError::Svg(format!("unsupported fill '{fill}'")))?;
    let index = palette::palette_index_of(rgb)
        .ok_or_else(|| CodecError::Svg(format!("fill '{fill}' is not a palette color")))?;

    for py in y..y + h {
        for px in x..x + w {
            grid.set(py * GRID_SIZE + px, index)?;
        }
    }
    Ok(())
}

/// Split `name="value" name='value'` pairs out of a start tag body.
fn parse_attributes(body: &str) -> Result<Vec<(&str, &str)>, CodecError> {
    let mut attrs = Vec::new();
    let mut rest = body.trim_start();
    while !rest.is_empty() && rest != "/" {
        let eq = rest
            .find('=')
            .ok_or_else(|| CodecError::Svg(format!("attribute without value near '{rest}'")))?;
        let name = rest[..eq].trim();
        let after = rest[eq + 1..].trim_start();
        let quote = after
            .chars()
            .next()
            .filter(|&c| c == '"' || c == '\'')
            .ok_or_else(|| CodecError::Svg(format!("unquoted value for '{name}'")))?;
        let value_end = after[1..]
            .find(quote)
            .ok_or_else(|| CodecError::Svg(format!("unterminated value for '{name}'")))?;
        attrs.push((name, &after[1..1 + value_end]));
        rest = after[value_end + 2..].trim_start();
    }
    Ok(attrs)
}

/// Expand a grid into RGBA bytes, `scale` output pixels per grid pixel.
pub fn to_rgba(grid: &PixelGrid, scale: usize) -> Vec<u8> {
    let side = GRID_SIZE * scale;
    let mut out = Vec::with_capacity(side * side * 4);
    for py in 0..side {
        for px in 0..side {
            let index = grid.get(px / scale, py / scale);
            out.extend_from_slice(&PALETTE[index as usize].to_rgba());
        }
    }
    out
}
