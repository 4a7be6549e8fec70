//! Force-directed planet layout.
//!
//! Iterative relaxation in the d3-force style: a per-tick cooling factor
//! (`alpha`) scales the charge and axis forces, velocities decay each
//! step, and the simulation counts as converged once alpha drops below
//! its floor. Forces per tick:
//!
//! - pairwise charge repulsion, with the most popular engine (the "sun")
//!   repelling 5x harder than the rest
//! - centroid centering toward the viewport center
//! - pairwise collision separation keeping a 10 px gap between planets
//! - a per-axis pull, strong for the sun, weak for everyone else
//!
//! Layout is deterministic numerical relaxation with no failure states;
//! an empty catalog just produces an empty node set.

use rand::Rng;

use crate::catalog::Engine;
use crate::i18n::Lang;

const SUN_CHARGE: f32 = -1000.0;
const PLANET_CHARGE: f32 = -200.0;
const CENTER_STRENGTH: f32 = 0.8;
const SUN_AXIS_STRENGTH: f32 = 0.8;
const PLANET_AXIS_STRENGTH: f32 = 0.05;
const COLLIDE_PADDING: f32 = 10.0;
const COLLIDE_STRENGTH: f32 = 0.9;
/// Initial positions are scattered within this distance of the center.
const SPAWN_JITTER: f32 = 250.0;

const ALPHA_MIN: f32 = 0.001;
/// 1 - ALPHA_MIN^(1/300): cools to the floor in roughly 300 ticks.
const ALPHA_DECAY: f32 = 0.0228;
const VELOCITY_DECAY: f32 = 0.4;

/// Below this viewport width the radius range shrinks for small screens.
const NARROW_VIEWPORT: f32 = 768.0;

/// A catalog entry plus live simulation state, rebuilt whenever the
/// catalog, viewport, or language changes.
#[derive(Debug, Clone)]
pub struct PlanetNode {
    pub engine: Engine,
    /// Description resolved for the active language.
    pub description: &'static str,
    /// Monthly-searches figure resolved for the active language.
    pub monthly_searches: &'static str,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
}

/// Min/max planet radius for a viewport. Smaller viewports get smaller
/// planets.
pub fn radius_range(width: f32, height: f32) -> (f32, f32) {
    let min_radius = if width < NARROW_VIEWPORT { 12.0 } else { 15.0 };
    let divisor = if width < NARROW_VIEWPORT { 10.0 } else { 8.0 };
    (min_radius, width.min(height) / divisor)
}

/// Square-root scale from `[0, max_popularity]` to `[min_radius,
/// max_radius]`, so planet area tracks popularity roughly linearly.
pub fn radius_scale(popularity: f32, max_popularity: f32, min_radius: f32, max_radius: f32) -> f32 {
    if max_popularity <= 0.0 {
        return min_radius;
    }
    let t = (popularity / max_popularity).clamp(0.0, 1.0).sqrt();
    min_radius + (max_radius - min_radius) * t
}

/// The running simulation. Exclusively owns and mutates its node array;
/// readers get the slice plus a snapshot version that bumps every tick.
pub struct Simulation {
    nodes: Vec<PlanetNode>,
    width: f32,
    height: f32,
    alpha: f32,
    version: u64,
}

impl Simulation {
    /// Sort by descending popularity, assign radii, and scatter initial
    /// positions around the viewport center. Node 0 is the sun.
    pub fn new(engines: &[Engine], lang: Lang, width: f32, height: f32) -> Self {
        let mut sorted: Vec<Engine> = engines.to_vec();
        sorted.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));

        let max_popularity = sorted.first().map(|e| e.popularity).unwrap_or(0.0);
        let (min_radius, max_radius) = radius_range(width, height);

        let mut rng = rand::thread_rng();
        let (cx, cy) = (width / 2.0, height / 2.0);
        let nodes = sorted
            .into_iter()
            .map(|engine| PlanetNode {
                description: engine.description.resolve(lang),
                monthly_searches: engine.monthly_searches.resolve(lang),
                x: cx + rng.gen_range(-SPAWN_JITTER..=SPAWN_JITTER),
                y: cy + rng.gen_range(-SPAWN_JITTER..=SPAWN_JITTER),
                vx: 0.0,
                vy: 0.0,
                radius: radius_scale(engine.popularity, max_popularity, min_radius, max_radius),
                engine,
            })
            .collect();

        Self {
            nodes,
            width,
            height,
            alpha: 1.0,
            version: 0,
        }
    }

    pub fn nodes(&self) -> &[PlanetNode] {
        &self.nodes
    }

    /// Bumped once per tick; lets a renderer tell snapshots apart.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_converged(&self) -> bool {
        self.alpha < ALPHA_MIN || self.nodes.is_empty()
    }

    /// The viewport this simulation was built for.
    pub fn viewport(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Integrate all forces once. Returns false (and does nothing) once
    /// converged.
    pub fn tick(&mut self) -> bool {
        if self.is_converged() {
            return false;
        }
        self.alpha += (0.0 - self.alpha) * ALPHA_DECAY;

        self.apply_charge();
        self.apply_axis_pull();
        self.apply_collisions();
        self.apply_centering();

        for node in &mut self.nodes {
            node.vx *= 1.0 - VELOCITY_DECAY;
            node.vy *= 1.0 - VELOCITY_DECAY;
            node.x += node.vx;
            node.y += node.vy;
        }

        self.version += 1;
        true
    }

    /// Pairwise inverse-square repulsion. Node 0 (the sun) carries the
    /// stronger charge.
    fn apply_charge(&mut self) {
        for i in 0..self.nodes.len() {
            for j in (i + 1)..self.nodes.len() {
                let dx = self.nodes[j].x - self.nodes[i].x;
                let dy = self.nodes[j].y - self.nodes[i].y;
                let d2 = (dx * dx + dy * dy).max(1.0);

                let charge_i = if i == 0 { SUN_CHARGE } else { PLANET_CHARGE };
                let charge_j = if j == 0 { SUN_CHARGE } else { PLANET_CHARGE };

                // i is pushed by j's charge and vice versa.
                let wi = charge_j * self.alpha / d2;
                let wj = charge_i * self.alpha / d2;
                self.nodes[i].vx += dx * wi;
                self.nodes[i].vy += dy * wi;
                self.nodes[j].vx -= dx * wj;
                self.nodes[j].vy -= dy * wj;
            }
        }
    }

    /// Per-axis pull toward the exact center: strong for the sun, weak
    /// for everything else.
    fn apply_axis_pull(&mut self) {
        let (cx, cy) = (self.width / 2.0, self.height / 2.0);
        for (i, node) in self.nodes.iter_mut().enumerate() {
            let strength = if i == 0 {
                SUN_AXIS_STRENGTH
            } else {
                PLANET_AXIS_STRENGTH
            };
            node.vx += (cx - node.x) * strength * self.alpha;
            node.vy += (cy - node.y) * strength * self.alpha;
        }
    }

    /// Separate any overlapping pair so the gap between surfaces reaches
    /// `COLLIDE_PADDING`. Position-level, mass-weighted by radius².
    fn apply_collisions(&mut self) {
        for i in 0..self.nodes.len() {
            for j in (i + 1)..self.nodes.len() {
                let dx = self.nodes[j].x - self.nodes[i].x;
                let dy = self.nodes[j].y - self.nodes[i].y;
                let min_dist = self.nodes[i].radius + self.nodes[j].radius + COLLIDE_PADDING;
                let d2 = dx * dx + dy * dy;
                if d2 >= min_dist * min_dist {
                    continue;
                }

                let d = d2.sqrt().max(1e-3);
                let overlap = (min_dist - d) / d * COLLIDE_STRENGTH;
                let ri2 = self.nodes[i].radius * self.nodes[i].radius;
                let rj2 = self.nodes[j].radius * self.nodes[j].radius;
                let wi = rj2 / (ri2 + rj2);
                let wj = 1.0 - wi;

                self.nodes[i].x -= dx * overlap * wi;
                self.nodes[i].y -= dy * overlap * wi;
                self.nodes[j].x += dx * overlap * wj;
                self.nodes[j].y += dy * overlap * wj;
            }
        }
    }

    /// Shift all nodes so the centroid moves toward the viewport center.
    fn apply_centering(&mut self) {
        if self.nodes.is_empty() {
            return;
        }
        let n = self.nodes.len() as f32;
        let mx: f32 = self.nodes.iter().map(|p| p.x).sum::<f32>() / n;
        let my: f32 = self.nodes.iter().map(|p| p.y).sum::<f32>() / n;
        let sx = (mx - self.width / 2.0) * CENTER_STRENGTH;
        let sy = (my - self.height / 2.0) * CENTER_STRENGTH;
        for node in &mut self.nodes {
            node.x -= sx;
            node.y -= sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled(width: f32, height: f32) -> Simulation {
        let mut sim = Simulation::new(Engine::all(), Lang::En, width, height);
        let mut ticks = 0;
        while sim.tick() {
            ticks += 1;
            assert!(ticks < 2000, "simulation failed to converge");
        }
        sim
    }

    #[test]
    fn radius_monotone_in_popularity() {
        let (min_r, max_r) = radius_range(1280.0, 800.0);
        let mut last = 0.0;
        for pop in [0.0, 5.0, 20.0, 35.0, 60.0, 100.0] {
            let r = radius_scale(pop, 100.0, min_r, max_r);
            assert!(r >= last, "radius not monotone at popularity {pop}");
            last = r;
        }
        assert_eq!(radius_scale(0.0, 100.0, min_r, max_r), min_r);
        assert_eq!(radius_scale(100.0, 100.0, min_r, max_r), max_r);
    }

    #[test]
    fn narrow_viewport_gets_smaller_planets() {
        let (wide_min, wide_max) = radius_range(1280.0, 800.0);
        let (narrow_min, narrow_max) = radius_range(400.0, 700.0);
        assert!(narrow_min < wide_min);
        assert!(narrow_max < wide_max);
    }

    #[test]
    fn nodes_sorted_by_descending_popularity() {
        let sim = Simulation::new(Engine::all(), Lang::En, 1280.0, 800.0);
        let nodes = sim.nodes();
        assert_eq!(nodes[0].engine.id, "google");
        for pair in nodes.windows(2) {
            assert!(pair[0].engine.popularity >= pair[1].engine.popularity);
        }
    }

    #[test]
    fn initial_positions_near_center() {
        let sim = Simulation::new(Engine::all(), Lang::En, 1280.0, 800.0);
        for node in sim.nodes() {
            assert!((node.x - 640.0).abs() <= SPAWN_JITTER);
            assert!((node.y - 400.0).abs() <= SPAWN_JITTER);
        }
    }

    #[test]
    fn no_overlap_at_rest() {
        let sim = settled(1280.0, 800.0);
        let nodes = sim.nodes();
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                let dx = nodes[j].x - nodes[i].x;
                let dy = nodes[j].y - nodes[i].y;
                let dist = (dx * dx + dy * dy).sqrt();
                let min_dist = nodes[i].radius + nodes[j].radius;
                assert!(
                    dist >= min_dist - 1.0,
                    "{} and {} overlap: {dist:.1} < {min_dist:.1}",
                    nodes[i].engine.id,
                    nodes[j].engine.id
                );
            }
        }
    }

    #[test]
    fn tick_bumps_version_until_converged() {
        let mut sim = Simulation::new(Engine::all(), Lang::En, 1280.0, 800.0);
        assert_eq!(sim.version(), 0);
        assert!(sim.tick());
        assert_eq!(sim.version(), 1);

        let mut sim = settled(1280.0, 800.0);
        let version = sim.version();
        assert!(!sim.tick());
        assert_eq!(sim.version(), version);
    }

    #[test]
    fn empty_catalog_is_an_empty_converged_layout() {
        let mut sim = Simulation::new(&[], Lang::En, 1280.0, 800.0);
        assert!(sim.nodes().is_empty());
        assert!(sim.is_converged());
        assert!(!sim.tick());
    }

    #[test]
    fn nodes_carry_language_resolved_text() {
        let sim = Simulation::new(Engine::all(), Lang::Es, 1280.0, 800.0);
        let google = sim
            .nodes()
            .iter()
            .find(|n| n.engine.id == "google")
            .unwrap();
        assert!(google.description.starts_with("El motor"));
        assert_eq!(google.monthly_searches, "Aprox. 90B+");
    }
}
