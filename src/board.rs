// Board geometry and occupancy queries
//
// Every query here is total over a well-formed board and side-effect free.
// Higher layers (reachability, legality, simulation) build on these.

use crate::types::{Battlesnake, Board, Coord, Direction};

/// Tile reached by stepping once from `pos` in `direction`
pub fn destination(pos: &Coord, direction: Direction) -> Coord {
    direction.apply(pos)
}

impl Coord {
    /// Squared euclidean distance, used for nearest-target selection
    pub fn distance_squared(&self, other: &Coord) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Calculates Manhattan distance between two coordinates
    pub fn manhattan(&self, other: &Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// The four orthogonal neighbors in direction priority order
    pub fn neighbors(&self) -> [Coord; 4] {
        let dirs = Direction::all();
        [
            dirs[0].apply(self),
            dirs[1].apply(self),
            dirs[2].apply(self),
            dirs[3].apply(self),
        ]
    }
}

impl Board {
    pub fn in_bounds(&self, pos: &Coord) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// True if any live snake's head or body segment covers `pos`, our own included
    pub fn is_occupied(&self, pos: &Coord) -> bool {
        self.snakes
            .iter()
            .filter(|s| s.is_alive())
            .any(|s| s.head == *pos || s.body.contains(pos))
    }

    pub fn is_hazard(&self, pos: &Coord) -> bool {
        self.hazards.contains(pos)
    }

    pub fn is_food(&self, pos: &Coord) -> bool {
        self.food.contains(pos)
    }

    /// Out of bounds or occupied
    pub fn is_blocked(&self, pos: &Coord) -> bool {
        !self.in_bounds(pos) || self.is_occupied(pos)
    }

    pub fn snake(&self, id: &str) -> Option<&Battlesnake> {
        self.snakes.iter().find(|s| s.id == id)
    }

    /// First snake on the board that is not `id`
    pub fn opponent_of(&self, id: &str) -> Option<&Battlesnake> {
        self.snakes.iter().find(|s| s.id != id)
    }

    pub fn alive_count(&self) -> usize {
        self.snakes.iter().filter(|s| s.is_alive()).count()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::types::{Battlesnake, Board, Coord};

    pub fn coords(points: &[(i32, i32)]) -> Vec<Coord> {
        points.iter().map(|&(x, y)| Coord { x, y }).collect()
    }

    pub fn snake(id: &str, health: i32, body: &[(i32, i32)]) -> Battlesnake {
        let body = coords(body);
        Battlesnake {
            id: id.to_string(),
            name: id.to_string(),
            health,
            head: body[0],
            length: body.len() as i32,
            body,
            latency: "0".to_string(),
            shout: None,
        }
    }

    pub fn board(width: i32, height: i32, snakes: Vec<Battlesnake>) -> Board {
        Board {
            width,
            height,
            food: vec![],
            snakes,
            hazards: vec![],
        }
    }
}
