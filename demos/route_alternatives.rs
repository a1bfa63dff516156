use colored::*;
use kpaths::graph::{DirectedGraph, Graph};
use kpaths::{Kisp, KShortestPaths, Yen};

/// A city grid with buildings and named places
struct CityGrid {
    width: usize,
    height: usize,
    buildings: Vec<Vec<bool>>,
    locations: Vec<(char, &'static str, (usize, usize))>,
}

impl CityGrid {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            buildings: vec![vec![false; width]; height],
            locations: Vec::new(),
        }
    }

    fn add_block(&mut self, xs: std::ops::Range<usize>, ys: std::ops::Range<usize>) {
        for y in ys {
            for x in xs.clone() {
                self.buildings[y][x] = true;
            }
        }
    }

    fn is_walkable(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && !self.buildings[y][x]
    }

    fn vertex(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn coord(&self, vertex: usize) -> (usize, usize) {
        (vertex % self.width, vertex / self.width)
    }

    fn location(&self, name: &str) -> Option<usize> {
        self.locations
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|&(_, _, (x, y))| self.vertex(x, y))
    }

    fn to_graph(&self) -> DirectedGraph<usize> {
        let mut graph = DirectedGraph::new();
        for v in 0..self.width * self.height {
            let _ = graph.add_vertex(v, ());
        }

        let directions = [
            (0, -1, 1.0), (1, 0, 1.0), (0, 1, 1.0), (-1, 0, 1.0),
            (1, -1, 1.4), (1, 1, 1.4), (-1, 1, 1.4), (-1, -1, 1.4),
        ];
        for y in 0..self.height {
            for x in 0..self.width {
                if !self.is_walkable(x, y) {
                    continue;
                }
                for (dx, dy, cost) in directions {
                    let nx = x as i64 + dx;
                    let ny = y as i64 + dy;
                    if nx < 0 || ny < 0 || !self.is_walkable(nx as usize, ny as usize) {
                        continue;
                    }
                    let _ = graph.add_edge(self.vertex(x, y), self.vertex(nx as usize, ny as usize), cost, ());
                }
            }
        }
        graph
    }
}

fn sample_city() -> CityGrid {
    let mut city = CityGrid::new(25, 14);
    city.add_block(3..7, 2..8);
    city.add_block(10..15, 4..11);
    city.add_block(18..22, 1..6);
    city.add_block(17..20, 9..13);
    city.locations.push(('H', "home", (1, 12)));
    city.locations.push(('W', "work", (23, 2)));
    city.locations.push(('G', "gym", (8, 1)));
    city
}

// Marks every route with its rank digit, best route drawn last
fn draw(city: &CityGrid, routes: &KShortestPaths<usize, f64>) {
    let mut grid: Vec<Vec<char>> = (0..city.height)
        .map(|y| {
            (0..city.width)
                .map(|x| if city.buildings[y][x] { '█' } else { '·' })
                .collect()
        })
        .collect();

    let filled: Vec<(f64, &[usize])> = routes.iter().collect();
    for (rank, (_, path)) in filled.iter().enumerate().rev() {
        let mark = char::from_digit((rank + 1) as u32 % 10, 10).unwrap_or('*');
        for &v in path.iter() {
            let (x, y) = city.coord(v);
            grid[y][x] = mark;
        }
    }
    for &(symbol, _, (x, y)) in &city.locations {
        grid[y][x] = symbol;
    }

    println!("{}", format!("┌{}┐", "─".repeat(city.width)).bright_white());
    for row in &grid {
        print!("{}", "│".bright_white());
        for &cell in row {
            let colored_cell = match cell {
                '█' => cell.to_string().on_bright_black().white(),
                '·' => cell.to_string().bright_black(),
                '1' => cell.to_string().bright_yellow().bold(),
                '2' => cell.to_string().bright_cyan(),
                '3' => cell.to_string().bright_magenta(),
                'H' | 'W' | 'G' => cell.to_string().bright_green().bold(),
                _ => cell.to_string().blue(),
            };
            print!("{}", colored_cell);
        }
        println!("{}", "│".bright_white());
    }
    println!("{}", format!("└{}┘", "─".repeat(city.width)).bright_white());
}

fn report(title: &str, routes: &KShortestPaths<usize, f64>) {
    println!("\n{}", title.bright_cyan().bold());
    for (rank, distance) in routes.distances.iter().enumerate() {
        let line = match &routes.paths[rank] {
            Some(path) => format!("  #{} {:>6.1} blocks over {} steps", rank + 1, distance, path.len() - 1),
            None => format!("  #{} no route", rank + 1),
        };
        if routes.paths[rank].is_some() {
            println!("{}", line.bright_white());
        } else {
            println!("{}", line.bright_red());
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let city = sample_city();
    let graph = city.to_graph();
    println!(
        "{} {} intersections, {} street segments",
        "🏙️".bright_cyan(),
        graph.vertex_count(),
        graph.edge_count()
    );

    let home = city.location("home").ok_or("home is not on the map")?;
    let work = city.location("work").ok_or("work is not on the map")?;

    let yen = Yen::new().with_parallel(true);
    let alternatives = yen.compute(&graph, &home, &work, 3)?;
    report("Yen: three shortest commutes", &alternatives);
    draw(&city, &alternatives);

    let independent = Kisp::new().compute(&graph, &home, &work, 3)?;
    report("Kisp: commutes that never share a street segment", &independent);
    draw(&city, &independent);

    Ok(())
}
