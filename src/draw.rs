#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    Points,
    Lines,
    LineStrip,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

/// Parameters of the single draw call issued by a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawSpec {
    pub topology: Topology,
    /// First vertex, or first index when `indexed`.
    pub first: usize,
    pub count: usize,
    pub indexed: bool,
}

impl DrawSpec {
    pub fn arrays(topology: Topology, first: usize, count: usize) -> Self {
        DrawSpec {
            topology,
            first,
            count,
            indexed: false,
        }
    }

    pub fn elements(topology: Topology, count: usize) -> Self {
        DrawSpec {
            topology,
            first: 0,
            count,
            indexed: true,
        }
    }

    pub fn elements_from(topology: Topology, first: usize, count: usize) -> Self {
        DrawSpec {
            first,
            ..Self::elements(topology, count)
        }
    }
}
