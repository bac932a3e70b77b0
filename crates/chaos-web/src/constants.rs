// DOM-side names and defaults for the web binding.

// Class toggled on a mounted element until its first frame renders
pub const HIDDEN_CLASS: &str = "chaos-hidden";

// Class applied to generated trail dots
pub const TRAIL_DOT_CLASS: &str = "chaos-trail-dot";

// Attribute carrying the preset name, for stylesheet hooks
pub const PRESET_ATTR: &str = "data-chaos-preset";
