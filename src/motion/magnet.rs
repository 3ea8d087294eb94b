//! Magnetic attraction field
//!
//! Interactive elements register here. Two independent behaviours read the
//! registry:
//! - hover magnetism: an element under the pointer leans toward it
//! - idle drift: the cursor picks the nearest eligible element to swim to

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Viewport};
use crate::settings::Eligibility;

/// Opaque handle chosen by the host for a registered element
pub type TargetId = u32;

/// Anything whose live bounding box can be queried
pub trait MagneticElement {
    fn bounds(&self) -> Rect;
}

impl MagneticElement for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Snapshot of one registered element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttractionTarget {
    pub id: TargetId,
    pub bounds: Rect,
    pub eligible: bool,
}

/// Registry of magnetic elements in registration order
#[derive(Default)]
pub struct AttractionField {
    elements: Vec<(TargetId, Box<dyn MagneticElement>)>,
}

impl std::fmt::Debug for AttractionField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttractionField")
            .field("ids", &self.ids())
            .finish()
    }
}

impl AttractionField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element. Re-registering an id replaces it in place.
    pub fn register(&mut self, id: TargetId, element: Box<dyn MagneticElement>) {
        if let Some(slot) = self.elements.iter_mut().find(|(eid, _)| *eid == id) {
            slot.1 = element;
        } else {
            self.elements.push((id, element));
        }
    }

    /// Returns true if the id was registered
    pub fn unregister(&mut self, id: TargetId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|(eid, _)| *eid != id);
        self.elements.len() != before
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn ids(&self) -> Vec<TargetId> {
        self.elements.iter().map(|(id, _)| *id).collect()
    }

    /// Query current bounds of every element and classify eligibility
    pub fn snapshot(&self, viewport: &Viewport, rules: &Eligibility) -> Vec<AttractionTarget> {
        self.elements
            .iter()
            .map(|(id, element)| {
                let bounds = element.bounds();
                AttractionTarget {
                    id: *id,
                    bounds,
                    eligible: is_eligible(&bounds, viewport, rules),
                }
            })
            .collect()
    }

    /// Hover displacement for every element under `pointer`.
    /// Elements the pointer is not over report zero.
    pub fn hover_offsets(&self, pointer: Vec2, strength: f32) -> Vec<(TargetId, Vec2)> {
        self.elements
            .iter()
            .map(|(id, element)| (*id, hover_displacement(&element.bounds(), pointer, strength)))
            .collect()
    }
}

/// Eligibility for idle drift. Cheap horizontal test first.
pub fn is_eligible(bounds: &Rect, viewport: &Viewport, rules: &Eligibility) -> bool {
    if rules.require_horizontal_containment && !viewport.contains_horizontally(bounds) {
        return false;
    }
    viewport.visible_height_fraction(bounds) > rules.min_visible_fraction
}

/// Center of the eligible target nearest to `anchor`.
/// Ties go to the earliest registered target.
pub fn nearest_eligible(targets: &[AttractionTarget], anchor: Vec2) -> Option<Vec2> {
    let mut best: Option<(f32, Vec2)> = None;
    for target in targets.iter().filter(|t| t.eligible) {
        let center = target.bounds.center();
        let dist = anchor.distance(center);
        match best {
            Some((best_dist, _)) if dist >= best_dist => {}
            _ => best = Some((dist, center)),
        }
    }
    best.map(|(_, center)| center)
}

/// Pull toward the pointer while it is inside `bounds`
pub fn hover_displacement(bounds: &Rect, pointer: Vec2, strength: f32) -> Vec2 {
    if bounds.contains(pointer) {
        (pointer - bounds.center()) * strength
    } else {
        Vec2::ZERO
    }
}
