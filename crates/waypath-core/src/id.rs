use slotmap::new_key_type;

new_key_type! {
    /// Identifies a node in a route graph.
    pub struct NodeId;

    /// Identifies an edge in a route graph.
    pub struct EdgeId;
}
