//! Built-in ghosts scene.
//!
//! Four ghosts enter from the left, follow a shared trail (each one a
//! fraction of the timeline behind the previous), then turn blue and line up
//! at the bottom right at the end of the document.
//!
//! Positions are fractions of the viewport, `eyes` is a rotation in degrees and
//! `r`/`g`/`b` are 0..255 colour channels.

use std::fmt;
use std::iter;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::builders::{channel, extend, offset_delta};
use crate::data::{Channel, Keyframe};
use crate::error::Result;
use crate::ids::ChannelId;
use crate::interp::functions::lerp_f64;
use crate::scene::Scene;
use crate::value::{Merge, ValueMap, Values};

/// Timeline distance between consecutive ghosts on the trail.
pub const STAGGER: f64 = 1.0 / 24.0;

pub const RED: Rgb = Rgb::new(255.0, 13.0, 11.0);
pub const PINK: Rgb = Rgb::new(255.0, 166.0, 168.0);
pub const CYAN: Rgb = Rgb::new(147.0, 255.0, 255.0);
pub const ORANGE: Rgb = Rgb::new(255.0, 124.0, 12.0);
/// Colour of every ghost once vulnerable.
pub const BLUE: Rgb = Rgb::new(60.0, 60.0, 153.0);

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub eyes: f64,
}

impl Pose {
    pub const fn new(x: f64, y: f64, eyes: f64) -> Self {
        Self { x, y, eyes }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// Overrides the horizontal position only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct XPosition(pub f64);

/// Everything a ghost needs per frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GhostValues {
    pub x: f64,
    pub y: f64,
    pub eyes: f64,
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl GhostValues {
    pub fn pose(&self) -> Pose {
        Pose::new(self.x, self.y, self.eyes)
    }

    pub fn color(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

impl Values for GhostValues {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            x: lerp_f64(a.x, b.x, t),
            y: lerp_f64(a.y, b.y, t),
            eyes: lerp_f64(a.eyes, b.eyes, t),
            r: lerp_f64(a.r, b.r, t),
            g: lerp_f64(a.g, b.g, t),
            b: lerp_f64(a.b, b.b, t),
        }
    }

    fn names(&self) -> Vec<&str> {
        vec!["x", "y", "eyes", "r", "g", "b"]
    }
}

impl Merge<Rgb> for Pose {
    type Output = GhostValues;

    fn merge(self, c: Rgb) -> GhostValues {
        GhostValues {
            x: self.x,
            y: self.y,
            eyes: self.eyes,
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

impl Merge<Rgb> for GhostValues {
    type Output = GhostValues;

    fn merge(self, c: Rgb) -> GhostValues {
        self.pose().merge(c)
    }
}

impl Merge<XPosition> for GhostValues {
    type Output = GhostValues;

    fn merge(self, XPosition(x): XPosition) -> GhostValues {
        GhostValues { x, ..self }
    }
}

impl From<GhostValues> for ValueMap {
    fn from(v: GhostValues) -> Self {
        ValueMap::from([
            ("x", v.x),
            ("y", v.y),
            ("eyes", v.eyes),
            ("r", v.r),
            ("g", v.g),
            ("b", v.b),
        ])
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ghost {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl Ghost {
    pub const ALL: [Ghost; 4] = [Ghost::Blinky, Ghost::Pinky, Ghost::Inky, Ghost::Clyde];

    pub fn as_str(self) -> &'static str {
        match self {
            Ghost::Blinky => "blinky",
            Ghost::Pinky => "pinky",
            Ghost::Inky => "inky",
            Ghost::Clyde => "clyde",
        }
    }

    /// Position in the procession; later ghosts trail behind.
    pub fn order(self) -> u8 {
        match self {
            Ghost::Blinky => 0,
            Ghost::Pinky => 1,
            Ghost::Inky => 2,
            Ghost::Clyde => 3,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Ghost::Blinky => RED,
            Ghost::Pinky => PINK,
            Ghost::Inky => CYAN,
            Ghost::Clyde => ORANGE,
        }
    }

    pub fn channel_id(self) -> ChannelId {
        ChannelId::from(self.as_str())
    }
}

impl fmt::Display for Ghost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ghost {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ghost::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| format!("unknown ghost '{s}'"))
    }
}

/// Entry from off-screen left.
fn staged() -> Vec<Keyframe<Pose>> {
    vec![
        Keyframe::new(0.0, Pose::new(-(1.0 / 8.0), 1.0 / 4.0, 90.0)),
        Keyframe::new(0.2, Pose::new(1.0 / 4.0, 1.0 / 4.0, 90.0)),
    ]
}

/// Shared path; eyes follow the direction of travel.
fn trail() -> Vec<Keyframe<Pose>> {
    vec![
        Keyframe::new(0.3, Pose::new(1.0 / 4.0, 1.0 / 4.0, 90.0)),
        Keyframe::new(0.4, Pose::new(3.0 / 4.0, 1.0 / 4.0, 90.0)),
        Keyframe::new(0.5, Pose::new(3.0 / 4.0, 1.0 / 2.0, 180.0)),
        Keyframe::new(0.6, Pose::new(1.0 / 4.0, 1.0 / 2.0, 270.0)),
        Keyframe::new(0.7, Pose::new(1.0 / 4.0, 3.0 / 4.0, 90.0)),
    ]
}

fn vulnerable() -> Keyframe<GhostValues> {
    Keyframe::new(1.0, Pose::new(3.0 / 4.0, 3.0 / 4.0, 0.0).merge(BLUE))
}

pub fn ghost_channel(ghost: Ghost) -> Result<Channel<GhostValues>> {
    let order = f64::from(ghost.order());
    let lineup = vulnerable().merge_values(XPosition((4.0 - order) / 5.0));
    channel(
        ghost.channel_id(),
        trail()
            .into_iter()
            .map(offset_delta(STAGGER * order))
            .chain(staged())
            .map(extend(ghost.color()))
            .chain(iter::once(lineup)),
    )
}

/// The four-ghost scene, channels in procession order.
pub fn scene() -> Result<Scene<GhostValues>> {
    let channels = Ghost::ALL
        .into_iter()
        .map(ghost_channel)
        .collect::<Result<Vec<_>>>()?;
    Scene::new(channels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ghost_names_round_trip() {
        for g in Ghost::ALL {
            assert_eq!(g.as_str().parse::<Ghost>(), Ok(g));
        }
        assert!("pacman".parse::<Ghost>().is_err());
    }

    #[test]
    fn each_channel_has_eight_keyframes() {
        for g in Ghost::ALL {
            assert_eq!(ghost_channel(g).unwrap().len(), 8);
        }
    }

    #[test]
    fn trail_is_staggered_per_ghost() {
        let clyde = ghost_channel(Ghost::Clyde).unwrap();
        let offsets: Vec<f64> = clyde.keyframes().map(|k| k.offset).collect();
        assert_eq!(offsets[0], 0.0);
        assert_eq!(offsets[1], 0.2);
        assert!((offsets[2] - (0.3 + 3.0 / 24.0)).abs() < 1e-12);
        assert_eq!(offsets[7], 1.0);
    }

    #[test]
    fn lineup_spreads_ghosts_horizontally() {
        let xs: Vec<f64> = Ghost::ALL
            .into_iter()
            .map(|g| ghost_channel(g).unwrap().last().values.x)
            .collect();
        assert_eq!(xs, vec![0.8, 0.6, 0.4, 0.2]);
    }
}
