/// A dense depth frame: one scalar depth in meters per pixel,
/// row-major. A value of 0.0 means "no return" at that pixel.
#[derive(Clone, Debug)]
pub struct DepthFrame {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl DepthFrame {
    pub fn new(data: Vec<f32>, rows: usize, cols: usize) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "data length must equal rows * cols"
        );
        Self { data, rows, cols }
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
