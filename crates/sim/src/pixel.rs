//! CPU rasterizer turning a dot set into an RGBA8 pixel buffer.

use dotfield_core::color::Srgb;
use dotfield_core::config::{Config, DrawStyle};
use dotfield_core::dot::Dot;
use dotfield_core::scene::SceneState;

/// Antialiasing band at the rim of a solid dot, in pixels.
const EDGE_WIDTH: f64 = 1.0;

/// Rasterizes the dots over the configured background color.
///
/// Output is row-major RGBA8, `width * height * 4` bytes for the scene's
/// rounded integer dimensions. Dots are composited back to front: grid
/// dots in placement order, layered dots ordered by layer then by
/// palette index so stacking is deterministic regardless of placement
/// order within a layer.
pub fn rasterize(dots: &[Dot], config: &Config, scene: &SceneState) -> Vec<u8> {
    let width = scene.width().round().max(0.0) as usize;
    let height = scene.height().round().max(0.0) as usize;
    let mut buf = vec![0u8; width * height * 4];
    fill_background(&mut buf, config.background);
    if width == 0 || height == 0 {
        return buf;
    }

    let mut order: Vec<usize> = (0..dots.len()).collect();
    order.sort_by_key(|&i| (dots[i].layer, dots[i].palette_index));

    for i in order {
        blend_dot(&mut buf, width, height, &dots[i], config, scene);
    }
    buf
}

fn fill_background(buf: &mut [u8], background: Srgb) {
    let px = encode(background);
    for chunk in buf.chunks_exact_mut(4) {
        chunk.copy_from_slice(&px);
    }
}

fn blend_dot(
    buf: &mut [u8],
    width: usize,
    height: usize,
    dot: &Dot,
    config: &Config,
    scene: &SceneState,
) {
    let (radius, softness, style) = match dot.layer {
        None => (config.grid.radius, 0.0, DrawStyle::Solid),
        Some(i) => {
            let layer = config.layer(i);
            (
                scene.layer_radius(i),
                layer.map_or(0.0, |l| l.softness.max(0.0)),
                layer.map_or(DrawStyle::Solid, |l| l.style),
            )
        }
    };
    if radius <= 0.0 {
        return;
    }
    // Softness widens the falloff band beyond the core radius.
    let outer = radius * (1.0 + softness);

    let x0 = ((dot.pos.x - outer).floor().max(0.0)) as usize;
    let y0 = ((dot.pos.y - outer).floor().max(0.0)) as usize;
    let x1 = ((dot.pos.x + outer).ceil().min(width as f64 - 1.0)).max(0.0) as usize;
    let y1 = ((dot.pos.y + outer).ceil().min(height as f64 - 1.0)).max(0.0) as usize;
    if dot.pos.x + outer < 0.0 || dot.pos.y + outer < 0.0 {
        return;
    }

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f64 + 0.5 - dot.pos.x;
            let dy = y as f64 + 0.5 - dot.pos.y;
            let dist = (dx * dx + dy * dy).sqrt();
            let alpha = coverage(dist, radius, outer, style);
            if alpha <= 0.0 {
                continue;
            }
            let idx = (y * width + x) * 4;
            blend_pixel(&mut buf[idx..idx + 4], dot.color, alpha);
        }
    }
}

/// Coverage at `dist` pixels from the dot center.
///
/// Solid dots are fully opaque inside the core radius with a one-pixel
/// antialiased rim, then fade linearly across the softness band.
/// Gradient dots fall off quadratically from the center to the outer
/// edge.
fn coverage(dist: f64, radius: f64, outer: f64, style: DrawStyle) -> f64 {
    match style {
        DrawStyle::Solid => {
            if outer > radius {
                if dist <= radius {
                    1.0
                } else {
                    (1.0 - (dist - radius) / (outer - radius)).max(0.0)
                }
            } else {
                (radius - dist + EDGE_WIDTH * 0.5).clamp(0.0, EDGE_WIDTH) / EDGE_WIDTH
            }
        }
        DrawStyle::Gradient => {
            let t = (1.0 - dist / outer).max(0.0);
            t * t
        }
    }
}

fn blend_pixel(px: &mut [u8], color: Srgb, alpha: f64) {
    let alpha = alpha.clamp(0.0, 1.0);
    let src = [color.r, color.g, color.b];
    for (c, s) in px.iter_mut().zip(src) {
        let dst = *c as f64 / 255.0;
        let out = dst * (1.0 - alpha) + s.clamp(0.0, 1.0) * alpha;
        *c = (out * 255.0).round() as u8;
    }
    px[3] = 255;
}

fn encode(color: Srgb) -> [u8; 4] {
    [
        (color.r.clamp(0.0, 1.0) * 255.0).round() as u8,
        (color.g.clamp(0.0, 1.0) * 255.0).round() as u8,
        (color.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        255,
    ]
}
