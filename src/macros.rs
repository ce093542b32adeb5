/*
 * Mantis, a chess rules engine
 * Copyright (C) 2024 Ciekce
 *
 * Mantis is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Mantis is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Mantis. If not, see <https://www.gnu.org/licenses/>.
 */

// Builds a fixed-size lookup table in a const context. The body is
// evaluated once per index with `$i` bound to that index.
macro_rules! const_table {
    (| $i:ident, $len:literal | $($body:tt)+) => {{
        let mut $i = 0usize;
        let first = { $($body)+ };
        let mut table = [first; $len];
        $i = 1;
        while $i < $len {
            table[$i] = { $($body)+ };
            $i += 1;
        }
        table
    }};
}

pub(crate) use const_table;

#[cfg(test)]
mod tests {
    use super::const_table;

    const SQUARES: [usize; 8] = const_table!(|i, 8| i * i);

    #[test]
    fn table_covers_every_index() {
        assert_eq!(SQUARES, [0, 1, 4, 9, 16, 25, 36, 49]);
    }

    #[test]
    fn nested_tables() {
        const GRID: [[usize; 3]; 2] = const_table!(|row, 2| const_table!(|col, 3| row * 3 + col));
        assert_eq!(GRID, [[0, 1, 2], [3, 4, 5]]);
    }
}
