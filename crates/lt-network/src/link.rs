//! Lane-to-lane connections and their signal state.

use lt_core::{LaneId, TlsId};

// ── LinkState ─────────────────────────────────────────────────────────────────

/// Right-of-way state of a link, one character per state.
///
/// | Char | Variant            | Char | Variant        |
/// |------|--------------------|------|----------------|
/// | `G`  | `GreenMajor`       | `M`  | `Major`        |
/// | `g`  | `GreenMinor`       | `m`  | `Minor`        |
/// | `r`  | `Red`              | `=`  | `Equal`        |
/// | `u`  | `RedYellow`        | `s`  | `Stop`         |
/// | `Y`  | `YellowMajor`      | `w`  | `AllwayStop`   |
/// | `y`  | `YellowMinor`      | `Z`  | `Zipper`       |
/// | `o`  | `OffBlinking`      | `-`  | `Deadend`      |
/// | `O`  | `OffNoSignal`      |      |                |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkState {
    GreenMajor,
    GreenMinor,
    Red,
    RedYellow,
    YellowMajor,
    YellowMinor,
    OffBlinking,
    OffNoSignal,
    #[default]
    Major,
    Minor,
    Equal,
    Stop,
    AllwayStop,
    Zipper,
    Deadend,
}

impl LinkState {
    pub fn as_char(self) -> char {
        match self {
            LinkState::GreenMajor  => 'G',
            LinkState::GreenMinor  => 'g',
            LinkState::Red         => 'r',
            LinkState::RedYellow   => 'u',
            LinkState::YellowMajor => 'Y',
            LinkState::YellowMinor => 'y',
            LinkState::OffBlinking => 'o',
            LinkState::OffNoSignal => 'O',
            LinkState::Major       => 'M',
            LinkState::Minor       => 'm',
            LinkState::Equal       => '=',
            LinkState::Stop        => 's',
            LinkState::AllwayStop  => 'w',
            LinkState::Zipper      => 'Z',
            LinkState::Deadend     => '-',
        }
    }

    pub fn from_char(c: char) -> Option<LinkState> {
        Some(match c {
            'G' => LinkState::GreenMajor,
            'g' => LinkState::GreenMinor,
            'r' => LinkState::Red,
            'u' => LinkState::RedYellow,
            'Y' => LinkState::YellowMajor,
            'y' => LinkState::YellowMinor,
            'o' => LinkState::OffBlinking,
            'O' => LinkState::OffNoSignal,
            'M' => LinkState::Major,
            'm' => LinkState::Minor,
            '=' => LinkState::Equal,
            's' => LinkState::Stop,
            'w' => LinkState::AllwayStop,
            'Z' => LinkState::Zipper,
            '-' => LinkState::Deadend,
            _ => return None,
        })
    }

    /// Parse a whole signal state string, e.g. `"GGrr"`.
    pub fn parse_all(s: &str) -> Option<Vec<LinkState>> {
        s.chars().map(LinkState::from_char).collect()
    }
}

impl std::fmt::Display for LinkState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// ── Link ──────────────────────────────────────────────────────────────────────

/// Who decides the state of a link.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LinkControl {
    /// Fixed priority state (`M`, `m`, `=`, …).
    Uncontrolled(LinkState),
    /// Driven by signal `index` of traffic light `tls`.
    Signal { tls: TlsId, index: usize },
}

/// A directed connection from the end of one lane to the start of another,
/// optionally crossing the junction on an internal `via` lane.
#[derive(Clone, Debug)]
pub struct Link {
    pub from: LaneId,
    pub to: LaneId,
    pub via: Option<LaneId>,
    pub control: LinkControl,
}

impl Link {
    /// The lane a vehicle is on right after passing this link.
    #[inline]
    pub fn via_or_target(&self) -> LaneId {
        self.via.unwrap_or(self.to)
    }

    /// `(controller, signal index)` if a traffic light drives this link.
    #[inline]
    pub fn signal(&self) -> Option<(TlsId, usize)> {
        match self.control {
            LinkControl::Signal { tls, index } => Some((tls, index)),
            LinkControl::Uncontrolled(_) => None,
        }
    }
}

// ── TrafficLight ──────────────────────────────────────────────────────────────

/// A traffic-light controller: an id plus its current signal state string.
///
/// Phase logic lives outside this crate; only the current state is held.
#[derive(Clone, Debug)]
pub struct TrafficLight {
    pub id: String,
    pub state: Vec<LinkState>,
}

impl TrafficLight {
    /// State of signal `index`.  Indices past the end read as `OffNoSignal`.
    #[inline]
    pub fn signal(&self, index: usize) -> LinkState {
        self.state.get(index).copied().unwrap_or(LinkState::OffNoSignal)
    }

    pub fn state_string(&self) -> String {
        self.state.iter().map(|s| s.as_char()).collect()
    }
}
