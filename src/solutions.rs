use anyhow::{bail, Context, Result};
use memchr::memchr_iter;
use num::Integer;
use rayon::prelude::*;
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::fence::measure;
use crate::geometry::{line_points, point_pairs, ray, Point};
use crate::grid::{Adjacency, Coord, Grid};
use crate::parse::{extract_ints, Parser};
use crate::pool::WorkerPool;
use crate::region::{find_regions, find_regions_with, SameAs};
use crate::parse_uint_from_bytes;

pub fn day1(input: &str) -> Result<(usize, usize)> {
    let bytes = input.as_bytes();
    let mut left = Vec::new();
    let mut right = Vec::new();

    let mut start = 0;
    for end in memchr_iter(b'\n', bytes).chain(std::iter::once(bytes.len())) {
        let line = &bytes[start..end];
        start = end + 1;
        let mut numbers = line
            .split(|b| b.is_ascii_whitespace())
            .filter(|n| !n.is_empty());
        match (numbers.next(), numbers.next()) {
            (Some(l), Some(r)) => {
                left.push(location_id(l)?);
                right.push(location_id(r)?);
            }
            (None, _) => continue,
            (Some(_), None) => bail!("line without a pair: {}", String::from_utf8_lossy(line)),
        }
    }

    left.sort_unstable();
    right.sort_unstable();
    let distance = left.iter().zip(&right).map(|(l, r)| l.abs_diff(*r)).sum();

    let mut counts: FxHashMap<usize, usize> = FxHashMap::default();
    for &r in &right {
        *counts.entry(r).or_default() += 1;
    }
    let similarity = left
        .iter()
        .map(|l| l * counts.get(l).copied().unwrap_or(0))
        .sum();

    Ok((distance, similarity))
}

/// Digits only; signs, letters and overflow are errors.
fn location_id(token: &[u8]) -> Result<usize> {
    std::str::from_utf8(token)
        .ok()
        .filter(|t| t.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|t| t.parse().ok())
        .with_context(|| format!("invalid location id '{}'", String::from_utf8_lossy(token)))
}

pub fn day2(input: &str) -> Result<(usize, usize)> {
    let reports = Parser::default()
        .lines(input)
        .into_iter()
        .map(|line| -> Result<Vec<i64>> {
            line.split_ascii_whitespace()
                .map(|level| {
                    level
                        .parse::<i64>()
                        .with_context(|| format!("invalid level '{level}' in '{line}'"))
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    let safe = reports.iter().filter(|levels| is_safe(levels)).count();
    let dampened = reports
        .iter()
        .filter(|levels| {
            is_safe(levels)
                || (0..levels.len()).any(|skip| {
                    let rest: Vec<i64> = levels
                        .iter()
                        .enumerate()
                        .filter(|&(i, _)| i != skip)
                        .map(|(_, &level)| level)
                        .collect();
                    is_safe(&rest)
                })
        })
        .count();
    Ok((safe, dampened))
}

/// Strictly monotonic with every step between 1 and 3.
fn is_safe(levels: &[i64]) -> bool {
    let steps = || levels.windows(2).map(|w| w[1] - w[0]);
    steps().all(|d| (1..=3).contains(&d)) || steps().all(|d| (-3..=-1).contains(&d))
}

pub fn day3(input: &str) -> Result<(usize, usize)> {
    let re = Regex::new(r"mul\((\d{1,3}),(\d{1,3})\)|do\(\)|don't\(\)")?;

    let mut enabled = true;
    let mut sum_part1 = 0;
    let mut sum_part2 = 0;
    for caps in re.captures_iter(input) {
        match &caps[0] {
            "do()" => enabled = true,
            "don't()" => enabled = false,
            _ => {
                let product = parse_uint_from_bytes(caps[1].as_bytes())
                    * parse_uint_from_bytes(caps[2].as_bytes());
                sum_part1 += product;
                if enabled {
                    sum_part2 += product;
                }
            }
        }
    }

    Ok((sum_part1, sum_part2))
}

pub fn day4(input: &str) -> Result<(usize, usize)> {
    let grid = Parser::default().parse_grid(input)?;

    let spells_at = |at: Coord, (d_row, d_col): (isize, isize), word: &[u8]| {
        let mut cursor = Some(at);
        word.iter().all(|&letter| match cursor {
            Some(here) if grid.get(here) == Some(&letter) => {
                cursor = here.offset(d_row, d_col);
                true
            }
            _ => false,
        })
    };

    let xmas: usize = grid
        .iter()
        .filter(|&(_, &letter)| letter == b'X')
        .map(|(at, _)| {
            Adjacency::WithDiagonals
                .offsets()
                .iter()
                .filter(|&&offset| spells_at(at, offset, &b"XMAS"[..]))
                .count()
        })
        .sum();

    // Both diagonals through an `A` read MAS in either direction.
    let is_mas = |a: Option<Coord>, b: Option<Coord>| {
        let corner = |c: Option<Coord>| c.and_then(|c| grid.get(c)).copied();
        matches!(
            (corner(a), corner(b)),
            (Some(b'M'), Some(b'S')) | (Some(b'S'), Some(b'M'))
        )
    };
    let crosses = grid
        .iter()
        .filter(|&(at, &letter)| {
            letter == b'A'
                && is_mas(at.offset(-1, -1), at.offset(1, 1))
                && is_mas(at.offset(-1, 1), at.offset(1, -1))
        })
        .count();

    Ok((xmas, crosses))
}

pub fn day5(input: &str) -> Result<(usize, usize)> {
    let parser = Parser::default();
    let [rules, updates] = parser.groups(input)[..] else {
        bail!("expected a block of rules and a block of updates");
    };

    let mut before: FxHashSet<(usize, usize)> = FxHashSet::default();
    for rule in parser.lines(rules) {
        let (first, second) = rule
            .split_once('|')
            .with_context(|| format!("malformed rule '{rule}'"))?;
        before.insert((page_number(first)?, page_number(second)?));
    }

    let mut sum_part1 = 0;
    let mut sum_part2 = 0;
    for update in parser.lines(updates) {
        let pages = update
            .split(',')
            .map(page_number)
            .collect::<Result<Vec<_>>>()?;
        let in_order = pages.iter().enumerate().all(|(i, &page)| {
            pages[i + 1..]
                .iter()
                .all(|&later| !before.contains(&(later, page)))
        });
        if in_order {
            sum_part1 += pages[pages.len() / 2];
            continue;
        }
        // Rank each page by how many pages of this update must precede it.
        let mut ranked: Vec<(usize, usize)> = pages
            .iter()
            .map(|&page| {
                let preceding = pages
                    .iter()
                    .filter(|&&other| before.contains(&(other, page)))
                    .count();
                (preceding, page)
            })
            .collect();
        ranked.sort_unstable();
        sum_part2 += ranked[ranked.len() / 2].1;
    }

    Ok((sum_part1, sum_part2))
}

fn page_number(text: &str) -> Result<usize> {
    text.trim()
        .parse()
        .with_context(|| format!("invalid page number '{text}'"))
}

/// Up, right, down, left: turning right is the next entry.
const HEADINGS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

pub fn day6(input: &str) -> Result<(usize, usize)> {
    let grid = Parser::default().parse_grid(input)?;
    let start = grid
        .iter()
        .find(|&(_, &cell)| cell == b'^')
        .map(|(at, _)| at)
        .context("no guard in the lab")?;

    let Patrol::Leaves(visited) = patrol(&grid, start, None) else {
        bail!("the guard is stuck in a loop without any extra obstruction");
    };
    let candidates: Vec<Coord> = visited.into_iter().filter(|&at| at != start).collect();
    let loops = WorkerPool::Global
        .filter_map(&candidates, |&at| {
            matches!(patrol(&grid, start, Some(at)), Patrol::Loops).then_some(at)
        })
        .len();

    Ok((candidates.len() + 1, loops))
}

enum Patrol {
    Leaves(FxHashSet<Coord>),
    Loops,
}

/// Walk the guard from `start`, treating `extra` as one more obstruction.
fn patrol(grid: &Grid<u8>, start: Coord, extra: Option<Coord>) -> Patrol {
    let dims = grid.dimensions();
    let mut seen = vec![[false; 4]; dims.area()];
    let mut visited = FxHashSet::default();
    let mut at = start;
    let mut heading = 0;
    loop {
        let Some(index) = dims.index(at) else {
            return Patrol::Leaves(visited);
        };
        if std::mem::replace(&mut seen[index][heading], true) {
            return Patrol::Loops;
        }
        visited.insert(at);
        let (d_row, d_col) = HEADINGS[heading];
        let Some(next) = at.offset(d_row, d_col).filter(|&next| dims.contains(next)) else {
            return Patrol::Leaves(visited);
        };
        if grid[next] == b'#' || Some(next) == extra {
            heading = (heading + 1) % HEADINGS.len();
        } else {
            at = next;
        }
    }
}

pub fn day7(input: &str) -> Result<(usize, usize)> {
    let equations = Parser::default()
        .lines(input)
        .into_iter()
        .map(|line| -> Result<(u64, Vec<u64>)> {
            let (target, operands) = line
                .split_once(':')
                .with_context(|| format!("malformed equation '{line}'"))?;
            let target = target
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid test value in '{line}'"))?;
            let operands = operands
                .split_ascii_whitespace()
                .map(|n| n.parse::<u64>().with_context(|| format!("invalid operand '{n}'")))
                .collect::<Result<Vec<_>>>()?;
            if operands.is_empty() {
                bail!("equation without operands '{line}'");
            }
            Ok((target, operands))
        })
        .collect::<Result<Vec<_>>>()?;

    let calibrate = |concat: bool| -> u64 {
        WorkerPool::Global
            .filter_map(&equations, |(target, operands)| {
                solvable(*target, operands, concat).then_some(*target)
            })
            .into_iter()
            .sum()
    };
    Ok((calibrate(false) as usize, calibrate(true) as usize))
}

/// Whether `operands`, combined left to right with `+`, `*` and (if
/// `concat`) digit concatenation, can produce `target`. Works backwards from
/// the last operand.
fn solvable(target: u64, operands: &[u64], concat: bool) -> bool {
    let Some((&last, rest)) = operands.split_last() else {
        return false;
    };
    if rest.is_empty() {
        return target == last;
    }
    if target >= last && solvable(target - last, rest, concat) {
        return true;
    }
    if last == 0 {
        if target == 0 {
            return true;
        }
    } else if target % last == 0 && solvable(target / last, rest, concat) {
        return true;
    }
    if concat {
        let digits = last.checked_ilog10().unwrap_or(0) + 1;
        if let Some(shift) = 10u64.checked_pow(digits) {
            if target >= last
                && (target - last) % shift == 0
                && solvable((target - last) / shift, rest, concat)
            {
                return true;
            }
        }
    }
    false
}

pub fn day8(input: &str) -> Result<(usize, usize)> {
    let grid = Parser::default().parse_grid(input)?;
    let dims = grid.dimensions();
    let mut antennas: FxHashMap<u8, Vec<Point>> = FxHashMap::default();
    for (at, &frequency) in grid.iter() {
        if frequency != b'.' {
            antennas.entry(frequency).or_default().push(Point::from(at));
        }
    }
    let inside = |p: &Point| p.to_coord(dims).is_some();

    let mut near = FxHashSet::default();
    let mut resonant = FxHashSet::default();
    for points in antennas.values() {
        for (a, b) in point_pairs(points) {
            let gap = b - a;
            near.extend([b + gap, a - gap].into_iter().filter(inside));

            let step = a.direction_to(b);
            resonant.extend(line_points(a, b));
            resonant.extend(ray(b, step).skip(1).take_while(inside));
            resonant.extend(ray(a, -step).skip(1).take_while(inside));
        }
    }

    Ok((near.len(), resonant.len()))
}

pub fn day9(input: &str) -> Result<(usize, usize)> {
    let digits = input
        .trim()
        .bytes()
        .map(|b| -> Result<usize> {
            if b.is_ascii_digit() {
                Ok(usize::from(b - b'0'))
            } else {
                bail!("invalid disk map byte {:?}", b as char)
            }
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((compact_blocks(&digits), compact_files(&digits)))
}

/// Move single blocks from the end into the leftmost gaps.
fn compact_blocks(digits: &[usize]) -> usize {
    let mut blocks: Vec<Option<usize>> = Vec::new();
    for (i, &len) in digits.iter().enumerate() {
        let file = i.is_even().then_some(i / 2);
        blocks.extend(std::iter::repeat(file).take(len));
    }

    let (mut left, mut right) = (0, blocks.len());
    loop {
        while left < right && blocks[left].is_some() {
            left += 1;
        }
        while left < right && blocks[right - 1].is_none() {
            right -= 1;
        }
        if left + 1 >= right {
            break;
        }
        blocks.swap(left, right - 1);
    }
    checksum(blocks.iter().enumerate().filter_map(|(pos, id)| Some((pos, (*id)?))))
}

/// Move whole files, highest id first, into the leftmost gap that fits.
fn compact_files(digits: &[usize]) -> usize {
    let mut files = Vec::new();
    let mut gaps = Vec::new();
    let mut position = 0;
    for (i, &len) in digits.iter().enumerate() {
        if i.is_even() {
            files.push((position, len));
        } else {
            gaps.push((position, len));
        }
        position += len;
    }

    for file in files.iter_mut().rev() {
        let (start, len) = *file;
        if let Some(gap) = gaps
            .iter_mut()
            .take_while(|gap| gap.0 < start)
            .find(|gap| gap.1 >= len)
        {
            *file = (gap.0, len);
            gap.0 += len;
            gap.1 -= len;
        }
    }
    checksum(
        files
            .iter()
            .enumerate()
            .flat_map(|(id, &(start, len))| (start..start + len).map(move |pos| (pos, id))),
    )
}

fn checksum(blocks: impl Iterator<Item = (usize, usize)>) -> usize {
    blocks.map(|(position, id)| position * id).sum()
}

pub fn day10(input: &str) -> Result<(usize, usize)> {
    // Anything that isn't a digit is impassable.
    let grid = Parser::default().parse_grid_with(input, |b| {
        Ok(if b.is_ascii_digit() { b - b'0' } else { u8::MAX })
    })?;
    let trailheads: Vec<Coord> = grid
        .iter()
        .filter(|&(_, &height)| height == 0)
        .map(|(at, _)| at)
        .collect();

    let (score, rating) = WorkerPool::Global
        .map(&trailheads, |&head| hike(&grid, head))
        .into_iter()
        .fold((0, 0), |(s, r), (peaks, paths)| (s + peaks, r + paths));
    Ok((score, rating))
}

/// Distinct summits reachable from `head`, and distinct uphill paths to them.
fn hike(grid: &Grid<u8>, head: Coord) -> (usize, usize) {
    let mut peaks = FxHashSet::default();
    let mut paths = 0;
    let mut stack = vec![head];
    while let Some(at) = stack.pop() {
        let height = grid[at];
        if height == 9 {
            peaks.insert(at);
            paths += 1;
            continue;
        }
        stack.extend(
            grid.neighbors(at, Adjacency::Orthogonal)
                .filter(|&next| grid[next] == height + 1),
        );
    }
    (peaks.len(), paths)
}

pub fn day11(input: &str) -> Result<(usize, usize)> {
    Ok((count_stones(input, 25)?, count_stones(input, 75)?))
}

fn count_stones(input: &str, blinks: usize) -> Result<usize> {
    let mut stones: FxHashMap<u64, usize> = FxHashMap::default();
    for engraving in input.split_ascii_whitespace() {
        let stone = engraving
            .parse()
            .with_context(|| format!("invalid stone '{engraving}'"))?;
        *stones.entry(stone).or_default() += 1;
    }

    for _ in 0..blinks {
        let mut next: FxHashMap<u64, usize> = FxHashMap::default();
        for (stone, count) in stones {
            if stone == 0 {
                *next.entry(1).or_default() += count;
                continue;
            }
            let digits = stone.ilog10() + 1;
            if digits.is_even() {
                let (high, low) = stone.div_rem(&10u64.pow(digits / 2));
                *next.entry(high).or_default() += count;
                *next.entry(low).or_default() += count;
            } else {
                *next.entry(stone * 2024).or_default() += count;
            }
        }
        stones = next;
    }

    Ok(stones.values().sum())
}

pub fn day12(input: &str) -> Result<(usize, usize)> {
    let grid = Parser::default().parse_grid(input)?;
    let plants: FxHashSet<u8> = grid.iter().map(|(_, &plant)| plant).collect();

    let mut price = 0;
    let mut bulk_price = 0;
    for plant in plants {
        for region in find_regions(&grid, &SameAs(plant), Adjacency::Orthogonal, 1)? {
            let cost = measure(grid.dimensions(), &region)?;
            price += cost.price();
            bulk_price += cost.bulk_price();
        }
    }

    Ok((price, bulk_price))
}

const ROOM_WIDTH: usize = 101;
const ROOM_HEIGHT: usize = 103;

pub fn day14(input: &str) -> Result<(usize, usize)> {
    day14_in(input, ROOM_WIDTH, ROOM_HEIGHT)
}

fn day14_in(input: &str, width: usize, height: usize) -> Result<(usize, usize)> {
    let robots = parse_robots(input)?;
    let safety = safety_factor(&robots, width, height, 100);
    // The picture is one large blob; random frames never come close.
    let min_cluster = (robots.len() / 10).max(1);
    let Some(picture) = first_picture(&robots, width, height, min_cluster)? else {
        bail!("no frame with a cluster of {min_cluster} robots");
    };
    Ok((safety, picture))
}

#[derive(Debug, Clone, Copy)]
struct Robot {
    position: (i64, i64),
    velocity: (i64, i64),
}

impl Robot {
    fn position_after(&self, seconds: usize, width: usize, height: usize) -> (usize, usize) {
        let t = seconds as i64;
        let x = (self.position.0 + t * self.velocity.0).rem_euclid(width as i64);
        let y = (self.position.1 + t * self.velocity.1).rem_euclid(height as i64);
        (x as usize, y as usize)
    }
}

fn parse_robots(input: &str) -> Result<Vec<Robot>> {
    Parser::default()
        .lines(input)
        .into_iter()
        .map(|line| -> Result<Robot> {
            match extract_ints(line)?[..] {
                [px, py, vx, vy] => Ok(Robot {
                    position: (px, py),
                    velocity: (vx, vy),
                }),
                _ => bail!("malformed robot '{line}'"),
            }
        })
        .collect()
}

fn safety_factor(robots: &[Robot], width: usize, height: usize, seconds: usize) -> usize {
    let (mid_x, mid_y) = (width / 2, height / 2);
    let mut quadrants = [0; 4];
    for robot in robots {
        let (x, y) = robot.position_after(seconds, width, height);
        if x == mid_x || y == mid_y {
            continue;
        }
        quadrants[usize::from(x > mid_x) + 2 * usize::from(y > mid_y)] += 1;
    }
    quadrants.iter().product()
}

/// Earliest second at which some orthogonally connected group of robots has
/// at least `min_cluster` members. Positions repeat after lcm(width, height).
fn first_picture(
    robots: &[Robot],
    width: usize,
    height: usize,
    min_cluster: usize,
) -> Result<Option<usize>> {
    let period = width.lcm(&height);
    let found = (0..period)
        .into_par_iter()
        .map(|t| largest_cluster(robots, width, height, t).map(|size| (t, size)))
        .find_first(|frame| frame.as_ref().map_or(true, |&(_, size)| size >= min_cluster));
    found.map(|frame| frame.map(|(t, _)| t)).transpose()
}

fn largest_cluster(
    robots: &[Robot],
    width: usize,
    height: usize,
    seconds: usize,
) -> Result<usize> {
    let mut occupied = vec![false; width * height];
    for robot in robots {
        let (x, y) = robot.position_after(seconds, width, height);
        occupied[y * width + x] = true;
    }
    let frame = Grid::from_cells(width, occupied)?;
    // Frames already run in parallel.
    let clusters = find_regions_with(
        &WorkerPool::Sequential,
        &frame,
        &SameAs(true),
        Adjacency::Orthogonal,
        1,
    )?;
    Ok(clusters.iter().map(|c| c.len()).max().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ALL_SOLUTIONS;

    use indoc::indoc;

    fn execute_day_input<I: ?Sized, S, T>(
        f: fn(&I) -> Result<(S, T)>,
        input: &I,
    ) -> Result<(S, T)> {
        f(input)
    }

    #[test]
    fn test_day1() -> Result<()> {
        let example = indoc! {"
            3   4
            4   3
            2   5
            1   3
            3   9
            3   3
        "};
        assert_eq!(execute_day_input(day1, example)?, (11, 31));
        assert!(day1("1   2\n3\n").is_err());
        assert!(day1("3   x\n4   3\n").is_err());
        assert!(day1("-3   4\n").is_err());
        assert!(day1("+3   4\n").is_err());
        assert!(day1("99999999999999999999999   4\n").is_err());
        assert_eq!(location_id(b"0042")?, 42);
        Ok(())
    }

    #[test]
    fn test_day2() -> Result<()> {
        let example = indoc! {"
            7 6 4 2 1
            1 2 7 8 9
            9 7 6 2 1
            1 3 2 4 5
            8 6 4 4 1
            1 3 6 7 9
        "};
        assert_eq!(execute_day_input(day2, example)?, (2, 4));
        assert!(is_safe(&[5]));
        assert!(!is_safe(&[1, 1]));
        assert!(day2("1 2 three\n").is_err());
        Ok(())
    }

    #[test]
    fn test_day3() -> Result<()> {
        let example_part1 =
            "xmul(2,4)%&mul[3,7]!@^do_not_mul(5,5)+mul(32,64]then(mul(11,8)mul(8,5))";
        assert_eq!(execute_day_input(day3, example_part1)?.0, 161);
        let example_part2 =
            "xmul(2,4)&mul[3,7]!^don't()_mul(5,5)+mul(32,64](mul(11,8)undo()?mul(8,5))";
        assert_eq!(execute_day_input(day3, example_part2)?, (161, 48));
        assert_eq!(day3("mul(1234,5) mul(2,3 )")?, (0, 0));
        Ok(())
    }

    #[test]
    fn test_day4() -> Result<()> {
        let example = indoc! {"
            MMMSXXMASM
            MSAMXMSMSA
            AMXSXMAAMM
            MSAMASMSMX
            XMASAMXAMM
            XXAMMXXAMA
            SMSMSASXSS
            SAXAMASAAA
            MAMMMXMMMM
            MXMXAXMASX
        "};
        assert_eq!(execute_day_input(day4, example)?, (18, 9));

        let crossed = indoc! {"
            M.S
            .A.
            M.S
        "};
        assert_eq!(day4(crossed)?, (0, 1));
        assert_eq!(day4("M.M\n.A.\nS.S\n")?, (0, 1));
        // Same letter on both ends of a diagonal.
        assert_eq!(day4("M.S\n.A.\nS.M\n")?, (0, 0));
        Ok(())
    }

    #[test]
    fn test_day5() -> Result<()> {
        let example = indoc! {"
            47|53
            97|13
            97|61
            97|47
            75|29
            61|13
            75|53
            29|13
            97|29
            53|29
            61|53
            97|53
            61|29
            47|13
            75|47
            97|75
            47|61
            75|61
            47|29
            75|13
            53|13

            75,47,61,53,29
            97,61,53,29,13
            75,29,13
            75,97,47,61,53
            61,13,29
            97,13,75,29,47
        "};
        assert_eq!(execute_day_input(day5, example)?, (143, 123));
        assert!(day5("1|2\n").is_err());
        assert!(day5("1-2\n\n1,2\n").is_err());
        Ok(())
    }

    #[test]
    fn test_day6() -> Result<()> {
        let example = indoc! {"
            ....#.....
            .........#
            ..........
            ..#.......
            .......#..
            ..........
            .#..^.....
            ........#.
            #.........
            ......#...
        "};
        assert_eq!(execute_day_input(day6, example)?, (41, 6));
        assert_eq!(day6(".^.\n")?, (1, 0));
        assert!(day6("...\n").is_err());
        Ok(())
    }

    #[test]
    fn test_day7() -> Result<()> {
        let example = indoc! {"
            190: 10 19
            3267: 81 40 27
            83: 17 5
            156: 15 6
            7290: 6 8 6 15
            161011: 16 10 13
            192: 17 8 14
            21037: 9 7 18 13
            292: 11 6 16 20
        "};
        assert_eq!(execute_day_input(day7, example)?, (3749, 11387));
        assert!(solvable(0, &[0, 5], false));
        assert!(solvable(10, &[1, 0], true));
        assert!(!solvable(10, &[1, 0], false));
        assert!(solvable(u64::MAX, &[u64::MAX], true));
        assert!(day7("12 3 4\n").is_err());
        assert!(day7("12:\n").is_err());
        Ok(())
    }

    #[test]
    fn test_day8() -> Result<()> {
        let example = indoc! {"
            ............
            ........0...
            .....0......
            .......0....
            ....0.......
            ......A.....
            ............
            ............
            ........A...
            .........A..
            ............
            ............
        "};
        assert_eq!(execute_day_input(day8, example)?, (14, 34));

        let three_t = indoc! {"
            T.........
            ...T......
            .T........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
        "};
        assert_eq!(day8(three_t)?.1, 9);
        Ok(())
    }

    #[test]
    fn test_day9() -> Result<()> {
        assert_eq!(execute_day_input(day9, "2333133121414131402\n")?, (1928, 2858));
        assert_eq!(day9("12345")?.0, 60);
        assert!(day9("12a4").is_err());
        Ok(())
    }

    #[test]
    fn test_day10() -> Result<()> {
        let example = indoc! {"
            89010123
            78121874
            87430965
            96549874
            45678903
            32019012
            01329801
            10456732
        "};
        assert_eq!(execute_day_input(day10, example)?, (36, 81));

        let forked = indoc! {"
            ...0...
            ...1...
            ...2...
            6543456
            7.....7
            8.....8
            9.....9
        "};
        assert_eq!(day10(forked)?, (2, 2));
        Ok(())
    }

    #[test]
    fn test_day11() -> Result<()> {
        assert_eq!(count_stones("125 17", 6)?, 22);
        assert_eq!(count_stones("125 17", 25)?, 55312);
        assert_eq!(count_stones("0 1 10 99 999", 1)?, 7);
        assert!(count_stones("12 x", 1).is_err());
        Ok(())
    }

    #[test]
    fn test_day12() -> Result<()> {
        let small = indoc! {"
            AAAA
            BBCD
            BBCC
            EEEC
        "};
        assert_eq!(execute_day_input(day12, small)?, (140, 80));

        let nested = indoc! {"
            OOOOO
            OXOXO
            OOOOO
            OXOXO
            OOOOO
        "};
        assert_eq!(day12(nested)?, (772, 436));

        let larger = indoc! {"
            RRRRIICCFF
            RRRRIICCCF
            VVRRRCCFFF
            VVRCCCJFFF
            VVVVCJJCFE
            VVIVCCJJEE
            VVIIICJJEE
            MIIIIIJJEE
            MIIISIJEEE
            MMMISSJEEE
        "};
        assert_eq!(day12(larger)?, (1930, 1206));

        let e_shape = indoc! {"
            EEEEE
            EXXXX
            EEEEE
            EXXXX
            EEEEE
        "};
        assert_eq!(day12(e_shape)?.1, 236);

        let holes = indoc! {"
            AAAAAA
            AAABBA
            AAABBA
            ABBAAA
            ABBAAA
            AAAAAA
        "};
        assert_eq!(day12(holes)?.1, 368);
        Ok(())
    }

    #[test]
    fn test_day14() -> Result<()> {
        let example = indoc! {"
            p=0,4 v=3,-3
            p=6,3 v=-1,-3
            p=10,3 v=-1,2
            p=2,0 v=2,-1
            p=0,0 v=1,3
            p=3,0 v=-2,-2
            p=7,6 v=-1,-3
            p=3,0 v=-1,-2
            p=9,3 v=2,3
            p=7,3 v=-1,2
            p=2,4 v=2,-3
            p=9,5 v=-3,-3
        "};
        let robots = parse_robots(example)?;
        assert_eq!(robots.len(), 12);
        assert_eq!(safety_factor(&robots, 11, 7, 100), 12);
        assert_eq!(day14_in(example, 11, 7)?.0, 12);

        let single = parse_robots("p=2,4 v=2,-3")?;
        assert_eq!(single[0].position_after(5, 11, 7), (1, 3));

        // A 3x3 block assembles at t=3 from scattered starts.
        let converging = indoc! {"
            p=2,6 v=0,1
            p=0,0 v=1,3
            p=9,1 v=2,5
            p=4,3 v=3,0
            p=2,4 v=4,2
            p=0,5 v=5,4
            p=6,0 v=6,6
            p=4,1 v=7,1
            p=2,2 v=8,3
        "};
        let robots = parse_robots(converging)?;
        assert_eq!(largest_cluster(&robots, 11, 7, 3)?, 9);
        assert_eq!(first_picture(&robots, 11, 7, 9)?, Some(3));
        assert_eq!(first_picture(&robots, 11, 7, 10)?, None);
        assert!(parse_robots("p=1,2 v=3").is_err());
        Ok(())
    }

    #[test]
    fn every_solution_is_registered() {
        let days: Vec<usize> = ALL_SOLUTIONS.iter().map(|&(day, _)| day).collect();
        assert_eq!(days, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 14]);
    }
}
