//! Named color palette and nearest-swatch matching.
//!
//! Colors are matched by squared Euclidean distance over 0–255 channels; on
//! an exact tie the earlier swatch in the table wins, so `black` and `white`
//! sit first.

use figwind_scene::types::Rgb;

/// The full named palette: black, white, and nine hues across ten shades.
const PALETTE: &[(&str, u32)] = &[
    ("black", 0x000000),
    ("white", 0xFFFFFF),
    ("gray-50", 0xF9FAFB),
    ("gray-100", 0xF3F4F6),
    ("gray-200", 0xE5E7EB),
    ("gray-300", 0xD1D5DB),
    ("gray-400", 0x9CA3AF),
    ("gray-500", 0x6B7280),
    ("gray-600", 0x4B5563),
    ("gray-700", 0x374151),
    ("gray-800", 0x1F2937),
    ("gray-900", 0x111827),
    ("red-50", 0xFEF2F2),
    ("red-100", 0xFEE2E2),
    ("red-200", 0xFECACA),
    ("red-300", 0xFCA5A5),
    ("red-400", 0xF87171),
    ("red-500", 0xEF4444),
    ("red-600", 0xDC2626),
    ("red-700", 0xB91C1C),
    ("red-800", 0x991B1B),
    ("red-900", 0x7F1D1D),
    ("yellow-50", 0xFFFBEB),
    ("yellow-100", 0xFEF3C7),
    ("yellow-200", 0xFDE68A),
    ("yellow-300", 0xFCD34D),
    ("yellow-400", 0xFBBF24),
    ("yellow-500", 0xF59E0B),
    ("yellow-600", 0xD97706),
    ("yellow-700", 0xB45309),
    ("yellow-800", 0x92400E),
    ("yellow-900", 0x78350F),
    ("green-50", 0xECFDF5),
    ("green-100", 0xD1FAE5),
    ("green-200", 0xA7F3D0),
    ("green-300", 0x6EE7B7),
    ("green-400", 0x34D399),
    ("green-500", 0x10B981),
    ("green-600", 0x059669),
    ("green-700", 0x047857),
    ("green-800", 0x065F46),
    ("green-900", 0x064E3B),
    ("blue-50", 0xEFF6FF),
    ("blue-100", 0xDBEAFE),
    ("blue-200", 0xBFDBFE),
    ("blue-300", 0x93C5FD),
    ("blue-400", 0x60A5FA),
    ("blue-500", 0x3B82F6),
    ("blue-600", 0x2563EB),
    ("blue-700", 0x1D4ED8),
    ("blue-800", 0x1E40AF),
    ("blue-900", 0x1E3A8A),
    ("indigo-50", 0xEEF2FF),
    ("indigo-100", 0xE0E7FF),
    ("indigo-200", 0xC7D2FE),
    ("indigo-300", 0xA5B4FC),
    ("indigo-400", 0x818CF8),
    ("indigo-500", 0x6366F1),
    ("indigo-600", 0x4F46E5),
    ("indigo-700", 0x4338CA),
    ("indigo-800", 0x3730A3),
    ("indigo-900", 0x312E81),
    ("purple-50", 0xF5F3FF),
    ("purple-100", 0xEDE9FE),
    ("purple-200", 0xDDD6FE),
    ("purple-300", 0xC4B5FD),
    ("purple-400", 0xA78BFA),
    ("purple-500", 0x8B5CF6),
    ("purple-600", 0x7C3AED),
    ("purple-700", 0x6D28D9),
    ("purple-800", 0x5B21B6),
    ("purple-900", 0x4C1D95),
    ("pink-50", 0xFDF2F8),
    ("pink-100", 0xFCE7F3),
    ("pink-200", 0xFBCFE8),
    ("pink-300", 0xF9A8D4),
    ("pink-400", 0xF472B6),
    ("pink-500", 0xEC4899),
    ("pink-600", 0xDB2777),
    ("pink-700", 0xBE185D),
    ("pink-800", 0x9D174D),
    ("pink-900", 0x831843),
    ("rose-50", 0xFFF1F2),
    ("rose-100", 0xFFE4E6),
    ("rose-200", 0xFECDD3),
    ("rose-300", 0xFDA4AF),
    ("rose-400", 0xFB7185),
    ("rose-500", 0xF43F5E),
    ("rose-600", 0xE11D48),
    ("rose-700", 0xBE123C),
    ("rose-800", 0x9F1239),
    ("rose-900", 0x881337),
];

fn channels(hex: u32) -> (f64, f64, f64) {
    (
        ((hex >> 16) & 0xFF) as f64,
        ((hex >> 8) & 0xFF) as f64,
        (hex & 0xFF) as f64,
    )
}

/// Map a 0–1 float color to the closest palette swatch name.
pub fn nearest_swatch(color: &Rgb) -> &'static str {
    let r = color.r * 255.0;
    let g = color.g * 255.0;
    let b = color.b * 255.0;

    let mut best = PALETTE[0].0;
    let mut best_dist = f64::INFINITY;
    for (name, hex) in PALETTE {
        let (sr, sg, sb) = channels(*hex);
        let dist = (sr - r).powi(2) + (sg - g).powi(2) + (sb - b).powi(2);
        if dist < best_dist {
            best = name;
            best_dist = dist;
        }
    }
    best
}
