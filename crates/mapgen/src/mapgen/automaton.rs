//! Binary 2-D cellular automaton over a Moore neighbourhood.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellularRule {
    pub birth: Vec<u8>,
    pub survive: Vec<u8>,
}

impl CellularRule {
    fn next_state(&self, alive: bool, neighbours: u8) -> bool {
        if alive { self.survive.contains(&neighbours) } else { self.birth.contains(&neighbours) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellBoard {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl CellBoard {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![false; width * height] }
    }

    pub fn from_fn(
        width: usize,
        height: usize,
        mut alive: impl FnMut(usize, usize) -> bool,
    ) -> Self {
        let mut board = Self::new(width, height);
        // Row-major so random seeding consumes the stream in a fixed order.
        for y in 0..height {
            for x in 0..width {
                board.cells[y * width + x] = alive(x, y);
            }
        }
        board
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cells outside the board read as dead.
    pub fn is_alive(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        self.cells[(y as usize) * self.width + (x as usize)]
    }

    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = alive;
        }
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    fn live_neighbours(&self, x: usize, y: usize) -> u8 {
        let (x, y) = (x as i64, y as i64);
        let mut count = 0;
        for ny in (y - 1)..=(y + 1) {
            for nx in (x - 1)..=(x + 1) {
                if (nx, ny) != (x, y) && self.is_alive(nx, ny) {
                    count += 1;
                }
            }
        }
        count
    }

    /// One synchronous generation: every cell reads the previous state.
    pub fn step(&mut self, rule: &CellularRule) {
        let mut next = self.cells.clone();
        for y in 0..self.height {
            for x in 0..self.width {
                let index = y * self.width + x;
                next[index] = rule.next_state(self.cells[index], self.live_neighbours(x, y));
            }
        }
        self.cells = next;
    }

    pub fn run(&mut self, rule: &CellularRule, steps: usize) {
        for _ in 0..steps {
            self.step(rule);
        }
    }
}
