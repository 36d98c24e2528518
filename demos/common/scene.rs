//! Sphere geometry, camera and uniform tables shared by the lighting demos.

#![allow(dead_code)]

use std::f32::consts::PI;

use glsession::glam::{Mat4, Vec3};
use glsession::{UniformValue, UniformValues, VertexLayout, Window};
use log::warn;

/// Position, texture coordinate, normal.
pub type SphereVertex = [f32; 8];

/// Layout of [`SphereVertex`] bound to the given attribute names.
pub fn layout(position: &str, normal: &str) -> VertexLayout {
    VertexLayout::new(std::mem::size_of::<SphereVertex>() as i32)
        .attribute(position, 3, 0)
        .attribute(normal, 3, 5 * 4)
}

/// UV sphere with `stacks` rings between the poles and `slices` segments
/// around, as an indexed triangle list.
pub fn sphere(radius: f32, stacks: u16, slices: u16) -> (Vec<SphereVertex>, Vec<u16>) {
    let mut vertices = Vec::with_capacity(usize::from(stacks + 1) * usize::from(slices + 1));
    for stack in 0..=stacks {
        let v = f32::from(stack) / f32::from(stacks);
        let phi = v * PI;
        for slice in 0..=slices {
            let u = f32::from(slice) / f32::from(slices);
            let theta = u * 2.0 * PI;
            let normal = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            let position = normal * radius;
            vertices.push([
                position.x, position.y, position.z, u, v, normal.x, normal.y, normal.z,
            ]);
        }
    }

    let row = slices + 1;
    let mut indices = Vec::with_capacity(usize::from(stacks) * usize::from(slices) * 6);
    for stack in 0..stacks {
        for slice in 0..slices {
            let a = stack * row + slice;
            let b = a + row;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    (vertices, indices)
}

/// Uniform values from `(name, components)` rows. Rows whose length is not a
/// uniform arity are logged and skipped.
pub fn uniform_table(rows: &[(&str, &[f32])]) -> UniformValues {
    let mut uniforms = UniformValues::new();
    for &(name, values) in rows {
        match UniformValue::from_slice(values) {
            Some(value) => uniforms.set(name, value),
            None => warn!("{name}: {} components is not a uniform value", values.len()),
        }
    }
    uniforms
}

/// Perspective for the window's aspect ratio.
pub fn projection(window: &Window) -> Mat4 {
    let (width, height) = window.size();
    let aspect = width as f32 / height.max(1) as f32;
    Mat4::perspective_rh_gl(45f32.to_radians(), aspect, 0.1, 100.0)
}

/// Looks at the origin from `distance` along +z.
pub fn view(distance: f32) -> Mat4 {
    Mat4::look_at_rh(Vec3::new(0.0, 0.0, distance), Vec3::ZERO, Vec3::Y)
}
