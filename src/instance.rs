//! Problem instance: depot, customers, distances, vehicle capacity.
//!
//! Node `0` is the depot, nodes `1..=n` are customers. Every field the
//! decoder and evaluator need is stored on a typed [`Node`] record and looked
//! up by integer id. The depot's demand and time window are never read.
//!
//! An [`Instance`] is validated once at construction and is read-only
//! afterwards, so it can be shared by any number of evaluations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Node id of the depot.
pub const DEPOT: usize = 0;

/// A depot or customer record.
///
/// # Examples
///
/// ```
/// use u_vrptw::instance::Node;
///
/// let depot = Node::depot(0.0, 0.0);
/// let c = Node::new(3.0, 4.0, 10.0).with_time_window(0.0, 50.0).with_service(5.0);
/// assert_eq!(c.demand, 10.0);
/// assert_eq!(c.due, 50.0);
/// assert_eq!(depot.demand, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    /// X-coordinate.
    pub x: f64,
    /// Y-coordinate.
    pub y: f64,
    /// Quantity delivered at this node.
    pub demand: f64,
    /// Earliest service start. Arriving earlier means waiting, which is free.
    pub ready: f64,
    /// Latest service start. Arriving later accrues lateness.
    pub due: f64,
    /// Service duration.
    pub service: f64,
}

impl Node {
    /// Creates a node with an unbounded time window and zero service time.
    pub fn new(x: f64, y: f64, demand: f64) -> Self {
        Self {
            x,
            y,
            demand,
            ready: 0.0,
            due: f64::MAX,
            service: 0.0,
        }
    }

    /// Creates a depot node at the given coordinates.
    pub fn depot(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    /// Sets the `[ready, due]` window.
    pub fn with_time_window(mut self, ready: f64, due: f64) -> Self {
        self.ready = ready;
        self.due = due;
        self
    }

    /// Sets the service duration.
    pub fn with_service(mut self, service: f64) -> Self {
        self.service = service;
        self
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Dense `(n+1) × (n+1)` distance matrix indexed by node id.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DistanceMatrix {
    size: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds the Euclidean matrix over the given nodes.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let size = nodes.len();
        let mut data = vec![0.0; size * size];
        for (i, a) in nodes.iter().enumerate() {
            for (j, b) in nodes.iter().enumerate() {
                data[i * size + j] = a.distance_to(b);
            }
        }
        Self { size, data }
    }

    /// Wraps a caller-supplied square matrix.
    ///
    /// Returns `Err` if the rows are not all of length `rows.len()`.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, String> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(format!(
                    "distance row {i} has {} entries, expected {size}",
                    row.len()
                ));
            }
            data.extend(row);
        }
        Ok(Self { size, data })
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from node `i` to node `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.size + j]
    }
}

/// A validated VRPTW instance.
///
/// # Examples
///
/// ```
/// use u_vrptw::instance::{Instance, Node};
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0),
///     Node::new(3.0, 4.0, 1.0),
///     Node::new(6.0, 8.0, 1.0),
/// ];
/// let inst = Instance::from_nodes(nodes, 10.0).unwrap();
/// assert_eq!(inst.num_customers(), 2);
/// assert!((inst.distance(0, 1) - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Instance {
    nodes: Vec<Node>,
    distances: DistanceMatrix,
    capacity: f64,
}

impl Instance {
    /// Creates an instance from nodes, a distance matrix and the vehicle capacity.
    ///
    /// Returns `Err` with a description if any field is unusable.
    pub fn new(nodes: Vec<Node>, distances: DistanceMatrix, capacity: f64) -> Result<Self, String> {
        if nodes.is_empty() {
            return Err("instance must contain the depot (node 0)".into());
        }
        if distances.size() != nodes.len() {
            return Err(format!(
                "distance matrix is {0}x{0} but there are {1} nodes",
                distances.size(),
                nodes.len()
            ));
        }
        if !capacity.is_finite() || capacity <= 0.0 {
            return Err(format!("vehicle capacity must be positive, got {capacity}"));
        }
        for (id, node) in nodes.iter().enumerate().skip(1) {
            if !node.demand.is_finite() || node.demand < 0.0 {
                return Err(format!("customer {id}: demand must be non-negative"));
            }
            if !node.service.is_finite() || node.service < 0.0 {
                return Err(format!("customer {id}: service time must be non-negative"));
            }
            if node.ready.is_nan() || node.due.is_nan() || node.ready > node.due {
                return Err(format!(
                    "customer {id}: invalid time window [{}, {}]",
                    node.ready, node.due
                ));
            }
        }
        if let Some(d) = distances.data.iter().find(|d| !d.is_finite() || **d < 0.0) {
            return Err(format!("distances must be finite and non-negative, found {d}"));
        }
        Ok(Self {
            nodes,
            distances,
            capacity,
        })
    }

    /// Creates an instance with a Euclidean distance matrix.
    pub fn from_nodes(nodes: Vec<Node>, capacity: f64) -> Result<Self, String> {
        let distances = DistanceMatrix::from_nodes(&nodes);
        Self::new(nodes, distances, capacity)
    }

    /// Number of customers `n` (the depot is not counted).
    pub fn num_customers(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Customer ids `1..=n`.
    pub fn customer_ids(&self) -> impl Iterator<Item = usize> {
        1..self.nodes.len()
    }

    /// Node record by id.
    #[inline]
    pub fn node(&self, id: usize) -> &Node {
        &self.nodes[id]
    }

    /// All nodes, depot first.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Travel distance (and time) between two node ids.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// The distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Vehicle capacity `Q`.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }
}
