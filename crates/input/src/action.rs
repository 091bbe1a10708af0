use regionscope_kernel::RegionBrowser;

/// A navigation command issued by whoever is viewing the region summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Step to the next region (wraps to the hottest after the last).
    Next,
    /// Step to the previous region (wraps to the last before the hottest).
    Previous,
    /// Jump to a 1-based position. Out-of-range positions wrap.
    Jump(i64),
    /// Back to the hottest region.
    First,
    /// Reload the statistics source and re-rank.
    Refresh,
    /// Stop browsing.
    Quit,
    /// Input that maps to nothing.
    Noop,
}

/// What the caller has to do after applying an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The selection may have changed; redraw.
    Moved,
    /// The caller must reload and call `RegionBrowser::refresh`.
    RefreshRequested,
    Quit,
    Ignored,
}

impl Action {
    /// Parse one line of user input.
    ///
    /// Accepts `n`/`next`/`]`, `p`/`prev`/`previous`/`[`, `g <n>` or a bare
    /// number, `first`/`home`, `r`/`refresh`, `q`/`quit`/`exit`.
    pub fn parse(input: &str) -> Self {
        let input = input.trim().to_ascii_lowercase();
        let mut words = input.split_whitespace();
        let Some(head) = words.next() else {
            return Self::Noop;
        };

        let action = match head {
            "n" | "next" | "]" => Self::Next,
            "p" | "prev" | "previous" | "[" => Self::Previous,
            "first" | "home" => Self::First,
            "r" | "refresh" => Self::Refresh,
            "q" | "quit" | "exit" => Self::Quit,
            "g" | "go" | "goto" => match words.next().and_then(|n| n.parse().ok()) {
                Some(position) => Self::Jump(position),
                None => Self::Noop,
            },
            other => match other.parse() {
                Ok(position) => Self::Jump(position),
                Err(_) => Self::Noop,
            },
        };

        if words.next().is_some() {
            return Self::Noop;
        }
        action
    }

    /// Apply this action to a browser.
    pub fn apply(self, browser: &mut RegionBrowser) -> Outcome {
        tracing::debug!(action = ?self, "applying action");
        match self {
            Self::Next => {
                browser.next();
                Outcome::Moved
            }
            Self::Previous => {
                browser.previous();
                Outcome::Moved
            }
            Self::Jump(position) => {
                browser.select(position.saturating_sub(1));
                Outcome::Moved
            }
            Self::First => {
                browser.select(0);
                Outcome::Moved
            }
            Self::Refresh => Outcome::RefreshRequested,
            Self::Quit => Outcome::Quit,
            Self::Noop => Outcome::Ignored,
        }
    }
}
