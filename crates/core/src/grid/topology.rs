//! Neighbour topology, built once per grid
//!
//! Each cell sees at most four orthogonal neighbours, clipped at the grid edge.
//! Diagonals are excluded, which gives fire fronts their diamond shape.

/// Offsets (row, col) of the orthogonal neighbours: up, down, left, right
pub const ORTHOGONAL_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Up to four neighbours of one cell, as indices into the grid's flat storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbourhood {
    indices: [usize; 4],
    len: u8,
}

impl Neighbourhood {
    fn push(&mut self, index: usize) {
        self.indices[self.len as usize] = index;
        self.len += 1;
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.indices[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Build the neighbourhood of every cell of a `size`×`size` grid, row-major.
pub fn build_topology(size: usize) -> Vec<Neighbourhood> {
    let mut topology = Vec::with_capacity(size * size);
    for row in 0..size {
        for col in 0..size {
            let mut hood = Neighbourhood {
                indices: [0; 4],
                len: 0,
            };
            for (dr, dc) in ORTHOGONAL_OFFSETS {
                let (Some(nr), Some(nc)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
                else {
                    continue;
                };
                if nr < size && nc < size {
                    hood.push(nr * size + nc);
                }
            }
            topology.push(hood);
        }
    }
    topology
}
