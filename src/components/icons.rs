//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuBookOpen as FilePdf, LuChevronLeft as ChevronLeft, LuChevronRight as ChevronRight,
        LuExternalLink as ExternalLink, LuFile as File, LuFolder as Folder, LuHouse as Home,
        LuVolume2 as Audio,
    };
}

mod bootstrap {
    pub use icondata::{
        BsBoxArrowUpRight as ExternalLink, BsChevronLeft as ChevronLeft,
        BsChevronRight as ChevronRight, BsFileEarmark as File, BsFileEarmarkPdf as FilePdf,
        BsFolderFill as Folder, BsHouseFill as Home, BsVolumeUp as Audio,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(CHEVRON_LEFT, ChevronLeft);
themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(HOME, Home);
themed_icon!(FOLDER, Folder);
themed_icon!(FILE, File);
themed_icon!(FILE_PDF, FilePdf);
themed_icon!(EXTERNAL_LINK, ExternalLink);
themed_icon!(AUDIO, Audio);

/// Icon for a listing row.
pub fn for_item(name: &str, is_dir: bool) -> Icon {
    if is_dir {
        FOLDER
    } else if name.to_ascii_lowercase().ends_with(".pdf") {
        FILE_PDF
    } else {
        FILE
    }
}
