// maps integer grid cells to world coordinates

use bevy::prelude::*;

use super::grid::{Cell, ConfigError};

/// World-space layout of the cell grid: tick coordinates per axis, anchor
/// points at every tick intersection, and a decorative ring of connector
/// points around each anchor.
#[derive(Debug, Clone)]
pub struct MapLayout {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
    pub num_x_cells: i32,
    pub num_y_cells: i32,
    pub num_connectors: usize,
    pub connector_radius: f32,
}

impl MapLayout {
    pub fn new(
        x_min: f32,
        x_max: f32,
        y_min: f32,
        y_max: f32,
        num_x_cells: i32,
        num_y_cells: i32,
        num_connectors: usize,
        connector_radius: f32,
    ) -> Result<Self, ConfigError> {
        if num_x_cells <= 0 || num_y_cells <= 0 {
            return Err(ConfigError::BadGridSize(num_x_cells, num_y_cells));
        }
        // the connector ring is built from opposing pairs
        if num_connectors % 2 != 0 {
            return Err(ConfigError::OddConnectorCount(num_connectors));
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
            num_x_cells,
            num_y_cells,
            num_connectors,
            connector_radius,
        })
    }

    pub fn grid_x_ticks(&self) -> Vec<f32> {
        linspace(self.x_min, self.x_max, self.num_x_cells as usize + 1)
    }

    pub fn grid_y_ticks(&self) -> Vec<f32> {
        linspace(self.y_min, self.y_max, self.num_y_cells as usize + 1)
    }

    /// One anchor per tick intersection.
    pub fn grid_anchors(&self) -> Vec<Vec2> {
        let x_ticks = self.grid_x_ticks();
        let y_ticks = self.grid_y_ticks();
        let mut anchors = Vec::with_capacity(x_ticks.len() * y_ticks.len());
        for &x in &x_ticks {
            for &y in &y_ticks {
                anchors.push(Vec2::new(x, y));
            }
        }
        anchors
    }

    /// `num_connectors` points evenly spaced on a circle of
    /// `connector_radius` around every anchor.
    pub fn connection_points(&self) -> Vec<Vec2> {
        let anchors = self.grid_anchors();
        let mut points = Vec::with_capacity(anchors.len() * self.num_connectors);
        for anchor in anchors {
            for i in 0..self.num_connectors {
                let theta = (i as f32 / self.num_connectors as f32) * std::f32::consts::TAU;
                let delta = Vec2::new(theta.cos(), theta.sin()) * self.connector_radius;
                points.push(anchor + delta);
            }
        }
        points
    }

    /// World position of a cell, at the tick intersection it indexes.
    pub fn cell_to_world(&self, cell: Cell) -> Vec2 {
        let x_ticks = self.grid_x_ticks();
        let y_ticks = self.grid_y_ticks();
        Vec2::new(x_ticks[cell.x as usize], y_ticks[cell.y as usize])
    }

    /// Ordered world positions of a whole path, start cell included.
    pub fn path_world_points(&self, start: Cell, sequence: &[Cell]) -> Vec<Vec2> {
        let mut points = Vec::with_capacity(sequence.len() + 1);
        points.push(self.cell_to_world(start));
        for &cell in sequence {
            points.push(self.cell_to_world(cell));
        }
        points
    }
}

// n evenly spaced values from min to max inclusive
fn linspace(min: f32, max: f32, n: usize) -> Vec<f32> {
    if n == 1 {
        return vec![min];
    }
    let step = (max - min) / (n - 1) as f32;
    (0..n).map(|i| min + step * i as f32).collect()
}
