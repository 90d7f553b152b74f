use serde::{Deserialize, Serialize};

/// Connection profile of an edge between two cells, derived purely from the
/// elevation difference of its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HexEdgeType {
    Flat,
    Slope,
    Cliff,
}

impl HexEdgeType {
    pub fn between(elevation1: i32, elevation2: i32) -> HexEdgeType {
        match (elevation1 - elevation2).abs() {
            0 => HexEdgeType::Flat,
            1 => HexEdgeType::Slope,
            _ => HexEdgeType::Cliff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(HexEdgeType::between(2, 2), HexEdgeType::Flat);
        assert_eq!(HexEdgeType::between(2, 3), HexEdgeType::Slope);
        assert_eq!(HexEdgeType::between(3, 2), HexEdgeType::Slope);
        assert_eq!(HexEdgeType::between(0, 2), HexEdgeType::Cliff);
        assert_eq!(HexEdgeType::between(5, 0), HexEdgeType::Cliff);
    }
}
