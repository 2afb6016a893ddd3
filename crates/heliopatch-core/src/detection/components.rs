use ndarray::Array2;

/// Axis-aligned bounding box in pixel coordinates, inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl BoundingBox {
    pub fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    pub fn height(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    /// Smallest box covering both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_row: self.min_row.min(other.min_row),
            max_row: self.max_row.max(other.max_row),
            min_col: self.min_col.min(other.min_col),
            max_col: self.max_col.max(other.max_col),
        }
    }
}

/// Statistics for a single connected component.
#[derive(Clone, Debug)]
pub struct ComponentStats {
    /// Unique label for this component.
    pub label: u32,
    /// Number of pixels in the component.
    pub area: usize,
    /// Bounding box of the component.
    pub bbox: BoundingBox,
    /// Unweighted centroid, (col, row) order.
    pub centroid: (f64, f64),
}

/// Connected component analysis on a binary mask using two-pass labeling
/// with union-find and 8-connectivity (upper-left, upper, upper-right and
/// left neighbors on the first pass).
///
/// Returns component statistics sorted by area descending (largest first).
pub fn connected_components(mask: &Array2<bool>) -> Vec<ComponentStats> {
    let (h, w) = mask.dim();
    if h == 0 || w == 0 {
        return Vec::new();
    }

    let mut labels = Array2::<u32>::zeros((h, w));
    let mut next_label: u32 = 1;
    // Union-find parent array. Index 0 unused; labels start at 1.
    let mut parent: Vec<u32> = vec![0; h * w / 2 + 2];

    // Pass 1: assign provisional labels.
    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }

            let mut neighbor_min = u32::MAX;
            let mut neighbors = [0u32; 4];
            let mut n = 0;
            if row > 0 {
                if col > 0 {
                    neighbors[n] = labels[[row - 1, col - 1]];
                    n += 1;
                }
                neighbors[n] = labels[[row - 1, col]];
                n += 1;
                if col + 1 < w {
                    neighbors[n] = labels[[row - 1, col + 1]];
                    n += 1;
                }
            }
            if col > 0 {
                neighbors[n] = labels[[row, col - 1]];
                n += 1;
            }

            for &lbl in &neighbors[..n] {
                if lbl > 0 && lbl < neighbor_min {
                    neighbor_min = lbl;
                }
            }

            if neighbor_min == u32::MAX {
                // New label.
                if next_label as usize >= parent.len() {
                    parent.resize(parent.len() * 2, 0);
                }
                parent[next_label as usize] = next_label;
                labels[[row, col]] = next_label;
                next_label += 1;
            } else {
                labels[[row, col]] = neighbor_min;
                for &lbl in &neighbors[..n] {
                    if lbl > 0 && lbl != neighbor_min {
                        union(&mut parent, neighbor_min, lbl);
                    }
                }
            }
        }
    }

    // Flatten parent references.
    for i in 1..next_label as usize {
        parent[i] = find(&parent, i as u32);
    }

    // Pass 2: resolve labels and collect stats.
    struct Accumulator {
        area: usize,
        bbox: BoundingBox,
        sum_row: f64,
        sum_col: f64,
    }
    let mut stats_map = std::collections::HashMap::<u32, Accumulator>::new();

    for row in 0..h {
        for col in 0..w {
            let lbl = labels[[row, col]];
            if lbl == 0 {
                continue;
            }
            let root = parent[lbl as usize];

            let entry = stats_map.entry(root).or_insert(Accumulator {
                area: 0,
                bbox: BoundingBox {
                    min_row: row,
                    max_row: row,
                    min_col: col,
                    max_col: col,
                },
                sum_row: 0.0,
                sum_col: 0.0,
            });

            entry.area += 1;
            entry.bbox.min_row = entry.bbox.min_row.min(row);
            entry.bbox.max_row = entry.bbox.max_row.max(row);
            entry.bbox.min_col = entry.bbox.min_col.min(col);
            entry.bbox.max_col = entry.bbox.max_col.max(col);
            entry.sum_row += row as f64;
            entry.sum_col += col as f64;
        }
    }

    let mut components: Vec<ComponentStats> = stats_map
        .into_iter()
        .map(|(label, acc)| ComponentStats {
            label,
            area: acc.area,
            bbox: acc.bbox,
            centroid: (acc.sum_col / acc.area as f64, acc.sum_row / acc.area as f64),
        })
        .collect();
    components.sort_unstable_by(|a, b| b.area.cmp(&a.area));
    components
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        // Merge larger root into smaller root to keep labels consistent.
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}
