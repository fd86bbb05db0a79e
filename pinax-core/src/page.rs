//! Panel pages and navigation
//!
//! Exactly one page is current at a time and exactly one page is remembered
//! as "last", giving the generic back button a single level of history.

/// Panel screen identifiers
///
/// Discriminants are the raw page ids of the panel personality. Only
/// [`Page::BootAnimation`] sits below the menu range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Page {
    BootAnimation = 0,
    MainMenu = 1,
    ToolMenu = 2,
    SdCard = 3,
    Print = 4,
    PrintConfig = 5,
    Preheat = 6,
    Move = 7,
    Level1 = 8,
    Level2 = 9,
    Filament = 10,
    SystemMenu = 11,
    Motor = 12,
    Pid = 13,
    AutoPid = 14,
    Statistics = 15,
    TemperatureGraph = 16,
}

impl Page {
    /// Raw page id as written to the page register
    pub fn raw(self) -> u8 {
        self as u8
    }
}

/// Current/last page tracking
///
/// Selecting a page below the menu range collapses both current and last to
/// the main menu; the raw id on the wire is always the requested one.
#[derive(Debug, Clone, Copy)]
pub struct Navigator {
    current: Page,
    last: Page,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Create a navigator resting on the main menu
    pub fn new() -> Self {
        Self {
            current: Page::MainMenu,
            last: Page::MainMenu,
        }
    }

    /// The page currently shown
    pub fn current(&self) -> Page {
        self.current
    }

    /// The page the back button returns to
    pub fn last(&self) -> Page {
        self.last
    }

    /// Record a page selection and return the raw id to emit
    pub fn select(&mut self, page: Page) -> u8 {
        if page.raw() >= Page::MainMenu.raw() {
            self.last = self.current;
            self.current = page;
        } else {
            self.last = Page::MainMenu;
            self.current = Page::MainMenu;
        }
        page.raw()
    }
}
