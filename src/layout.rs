//! Pixel geometry of the ladder on a fixed-size surface, plus hit-testing of
//! participant labels. Computed from the ladder shape and handed to whoever
//! draws or handles clicks.

pub const TOP_MARGIN: f64 = 40.0;
pub const BOTTOM_MARGIN: f64 = 40.0;
/// Participant names sit this far above the first rail point.
pub const NAME_OFFSET: f64 = 15.0;
/// Outcome labels sit this far below the bottom of the rails.
pub const OUTCOME_OFFSET: f64 = 30.0;
pub const HIT_TOLERANCE: f64 = 20.0;

/// Where a participant's name is drawn; also its click target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelAnchor {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub line_gap: f64,
    pub rail_top: f64,
    pub rail_bottom: f64,
    /// One y per slot, top to bottom.
    pub slot_ys: Vec<f64>,
    pub names: Vec<LabelAnchor>,
    pub outcomes: Vec<LabelAnchor>,
}

impl Layout {
    pub fn compute(width: f64, height: f64, participants: usize, slots: usize) -> Self {
        let line_gap = width / (participants as f64 + 1.0);
        let rail_top = TOP_MARGIN;
        let rail_bottom = height - BOTTOM_MARGIN;
        let slot_height = (height - TOP_MARGIN - BOTTOM_MARGIN) / (slots as f64 + 1.0);
        let slot_ys = (0..slots)
            .map(|i| TOP_MARGIN + (i as f64 + 1.0) * slot_height)
            .collect();
        let column_x = |i: usize| (i as f64 + 1.0) * line_gap;
        let names = (0..participants)
            .map(|index| LabelAnchor { index, x: column_x(index), y: rail_top - NAME_OFFSET })
            .collect();
        let outcomes = (0..participants)
            .map(|index| LabelAnchor { index, x: column_x(index), y: rail_bottom + OUTCOME_OFFSET })
            .collect();
        Self { width, height, line_gap, rail_top, rail_bottom, slot_ys, names, outcomes }
    }

    pub fn column_x(&self, column: usize) -> f64 {
        (column as f64 + 1.0) * self.line_gap
    }

    /// y of a slot, or the rail bottom past the last slot.
    pub fn slot_y(&self, slot: usize) -> f64 {
        self.slot_ys.get(slot).copied().unwrap_or(self.rail_bottom)
    }

    /// Participant whose name is under `(x, y)`.
    pub fn hit_participant(&self, x: f64, y: f64) -> Option<usize> {
        hit_test(&self.names, x, y, HIT_TOLERANCE)
    }
}

/// Nearest anchor within `tolerance` on both axes (strict), if any.
pub fn hit_test(anchors: &[LabelAnchor], x: f64, y: f64, tolerance: f64) -> Option<usize> {
    anchors
        .iter()
        .filter(|a| (x - a.x).abs() < tolerance && (y - a.y).abs() < tolerance)
        .min_by(|a, b| {
            let da = (x - a.x).powi(2) + (y - a.y).powi(2);
            let db = (x - b.x).powi(2) + (y - b.y).powi(2);
            da.total_cmp(&db)
        })
        .map(|a| a.index)
}
