//! Save-time mask and draw planning.
//!
//! For every overlay with text, the planner produces a pair of page-space
//! instructions: an opaque white rectangle over the original content, then
//! the replacement text on top. The mask comes from the overlay's bounds
//! snapshot replayed under the current rotation; the text geometry comes
//! from the overlay's current rectangle. Geometrically unusable overlays
//! are skipped with a warning, never failing the save; a page the document
//! library cannot size fails the whole save.

use crate::config::DEFAULT_LINE_HEIGHT;
use crate::error::{Error, Result};
use crate::fonts::{self, metrics};
use crate::geometry::Rect;
use crate::save::{Color, MaskOp, OverlayDrawPlan, OverlayState, PagePlan, SavePayload, TextOp};

/// Fill used when an overlay's hex color does not parse: the same dark gray
/// (#333333) the extractor falls back to.
fn fallback_color() -> Color {
    Color::new(0.2, 0.2, 0.2)
}

/// Plan one overlay, or `None` when it is geometrically unusable.
fn plan_overlay(
    overlay: &OverlayState,
    viewport_width: f32,
    viewport_height: f32,
    rotation: crate::overlay::Rotation,
    page_width: f32,
    page_height: f32,
) -> Option<OverlayDrawPlan> {
    if overlay.text.trim().is_empty() {
        return None;
    }

    let width_ratio = overlay.width / viewport_width;
    let height_ratio = overlay.height / viewport_height;
    if !(width_ratio.is_finite() && height_ratio.is_finite())
        || width_ratio <= 0.0
        || height_ratio <= 0.0
    {
        log::warn!(
            "skipping overlay {:?}: unusable size ratios ({width_ratio}, {height_ratio})",
            overlay.id
        );
        return None;
    }

    // Current geometry in page space, via ratio scaling
    let current = Rect::new(
        overlay.left / viewport_width * page_width,
        overlay.top / viewport_height * page_height,
        width_ratio * page_width,
        height_ratio * page_height,
    );
    if current.is_degenerate() {
        log::warn!("skipping overlay {:?}: degenerate page rect {current:?}", overlay.id);
        return None;
    }

    // Mask geometry: the captured original bounds replayed under the
    // current rotation, falling back to the current rect for overlays
    // never captured (freshly created boxes cover nothing underneath).
    let mask_rect = match &overlay.original_bounds {
        Some(snapshot) => snapshot.replay(rotation, page_width, page_height),
        None => current,
    };
    if mask_rect.is_degenerate() {
        log::warn!("skipping overlay {:?}: degenerate mask rect {mask_rect:?}", overlay.id);
        return None;
    }

    let scaled_font_size = overlay.font_size * (page_height / viewport_height);
    if !scaled_font_size.is_finite() || scaled_font_size <= 0.0 {
        log::warn!("skipping overlay {:?}: unusable font size {scaled_font_size}", overlay.id);
        return None;
    }

    let line_height_ratio = if overlay.line_height.is_finite() && overlay.line_height > 0.0 {
        overlay.line_height
    } else {
        DEFAULT_LINE_HEIGHT
    };
    let line_height = scaled_font_size * line_height_ratio;

    let bold = overlay.font_weight.is_bold();
    let font = fonts::base_font_name(&overlay.font_family, bold);
    let color = Color::from_hex(&overlay.fill).unwrap_or_else(|| {
        log::warn!("overlay {:?}: unparseable fill {:?}, using fallback", overlay.id, overlay.fill);
        fallback_color()
    });

    // Estimate whether the replacement text still fits the masked area
    let class = fonts::resolve_class(&overlay.font_family);
    let estimated_lines = metrics::line_count(&overlay.text, current.width, scaled_font_size, class, bold);
    let estimated_height = estimated_lines as f32 * line_height;
    if estimated_height > mask_rect.height + line_height {
        log::warn!(
            "overlay {:?}: ~{estimated_lines} wrapped lines likely overflow the {:.1}-unit mask",
            overlay.id,
            mask_rect.height
        );
    }

    // Flip into the document's bottom-up Y convention
    let mask = MaskOp {
        rect_x: mask_rect.x,
        rect_y: page_height - (mask_rect.y + mask_rect.height),
        width: mask_rect.width,
        height: mask_rect.height,
        color: Color::white(),
        opacity: 1.0,
    };
    let text = TextOp {
        x: current.x,
        y: page_height - (current.y + scaled_font_size),
        size: scaled_font_size,
        line_height,
        max_width: current.width,
        font: font.to_string(),
        color,
        text: overlay.text.clone(),
    };

    Some(OverlayDrawPlan { mask, text })
}

/// Plan a whole save.
///
/// `page_bounds` resolves a payload page number to the page's intrinsic
/// `(width, height)` from the document library; a page it cannot resolve
/// fails the save. Pages are planned in ascending page-number order; within
/// a page each overlay is an independent mask-and-draw pair.
pub fn plan_save<F>(payload: &SavePayload, page_bounds: F) -> Result<Vec<PagePlan>>
where
    F: Fn(u32) -> Option<(f32, f32)>,
{
    let mut order: Vec<usize> = (0..payload.pages.len()).collect();
    order.sort_by_key(|&i| payload.pages[i].page_number);

    let mut plans = Vec::with_capacity(order.len());
    for index in order {
        let page = &payload.pages[index];
        let (page_width, page_height) =
            page_bounds(page.page_number).ok_or(Error::MissingPageBounds(page.page_number))?;
        if !(page_width.is_finite() && page_height.is_finite())
            || page_width <= 0.0
            || page_height <= 0.0
        {
            return Err(Error::SaveFailed(format!(
                "document library reported unusable bounds {page_width}x{page_height} for page {}",
                page.page_number
            )));
        }

        let viewport_ok = page.width.is_finite()
            && page.height.is_finite()
            && page.width > 0.0
            && page.height > 0.0;

        let overlays = if viewport_ok {
            page.overlays
                .iter()
                .filter_map(|overlay| {
                    plan_overlay(
                        overlay,
                        page.width,
                        page.height,
                        page.rotation,
                        page_width,
                        page_height,
                    )
                })
                .collect()
        } else {
            log::warn!(
                "page {}: missing viewport size, skipping {} overlays",
                page.page_number,
                page.overlays.len()
            );
            Vec::new()
        };

        plans.push(PagePlan {
            page_number: page.page_number,
            overlays,
        });
    }

    Ok(plans)
}
