//! Paired class and instance label maps.
//!
//! Shapes are drawn in input order and later shapes overwrite earlier ones
//! wherever they overlap. Pixels no shape covers stay 0 in both maps.

use std::collections::HashMap;

use ndarray::Array2;

use crate::error::LabelmaskError;
use crate::label_table::LabelTable;
use crate::raster::{self, RasterizeOptions};
use crate::shape::{GroupIdSource, ImageSize, InstanceKey, SequentialGroupIds, Shape};

/// Class ids and 1-based instance indices per pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelMaps {
    /// Class id of the last shape covering each pixel, 0 where none does.
    pub class_map: Array2<i32>,

    /// Instance index of the last shape covering each pixel, 0 where none does.
    pub instance_map: Array2<i32>,

    instances: Vec<InstanceKey>,
}

impl LabelMaps {
    /// Instance identities in first-seen order; index `i` is instance `i + 1`.
    pub fn instances(&self) -> &[InstanceKey] {
        &self.instances
    }

    /// The identity behind an instance index, if it was assigned.
    pub fn instance(&self, index: i32) -> Option<&InstanceKey> {
        let i = usize::try_from(index).ok()?.checked_sub(1)?;
        self.instances.get(i)
    }

    /// Splits into `(class_map, instance_map)`.
    pub fn into_parts(self) -> (Array2<i32>, Array2<i32>) {
        (self.class_map, self.instance_map)
    }
}

/// Append-only registry handing out 1-based indices in first-seen order.
#[derive(Debug, Default)]
struct InstanceRegistry {
    order: Vec<InstanceKey>,
    index: HashMap<InstanceKey, i32>,
}

impl InstanceRegistry {
    fn index_of(&mut self, key: InstanceKey) -> i32 {
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        self.order.push(key.clone());
        let idx = self.order.len() as i32;
        self.index.insert(key, idx);
        idx
    }
}

/// Builds class and instance maps with default options and group ids.
///
/// # Errors
/// - [`LabelmaskError::MissingIgnoreLabel`] if the table lacks `__ignore__`.
/// - [`LabelmaskError::InvalidShape`] if any shape has a bad point count.
/// - [`LabelmaskError::ClassIdOverflow`] if a drawn class id exceeds `i32::MAX`.
pub fn build_label_maps(
    size: ImageSize,
    shapes: &[Shape],
    table: &LabelTable,
) -> Result<LabelMaps, LabelmaskError> {
    build_label_maps_with(
        size,
        shapes,
        table,
        &RasterizeOptions::default(),
        &mut SequentialGroupIds::new(),
    )
}

/// Builds class and instance maps with explicit options and group id source.
///
/// Instance identity is `(label, group)`. A shape without a group id gets a
/// generated one, so it becomes an instance of its own.
pub fn build_label_maps_with<G: GroupIdSource + ?Sized>(
    size: ImageSize,
    shapes: &[Shape],
    table: &LabelTable,
    opts: &RasterizeOptions,
    ids: &mut G,
) -> Result<LabelMaps, LabelmaskError> {
    let ignore = table.ignore_id()?;

    let mut class_map = Array2::<i32>::zeros(size.dim());
    let mut instance_map = Array2::<i32>::zeros(size.dim());
    let mut registry = InstanceRegistry::default();

    for shape in shapes {
        let instance = registry.index_of(shape.instance_key(ids));
        let value = table.class_id_or(&shape.label, ignore);
        let class = i32::try_from(value).map_err(|_| LabelmaskError::ClassIdOverflow {
            label: shape.label.clone(),
            value,
        })?;
        let mask = raster::rasterize_with(size, shape, opts)?;

        ndarray::Zip::from(&mut class_map)
            .and(&mut instance_map)
            .and(&mask)
            .for_each(|cls, ins, &covered| {
                if covered {
                    *cls = class;
                    *ins = instance;
                }
            });
    }

    log::debug!(
        "built {}x{} label maps with {} instance(s) from {} shape(s)",
        size.height,
        size.width,
        registry.order.len(),
        shapes.len()
    );
    Ok(LabelMaps {
        class_map,
        instance_map,
        instances: registry.order,
    })
}
