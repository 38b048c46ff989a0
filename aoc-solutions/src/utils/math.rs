//! Small numeric helpers

use num_integer::Integer;

/// Greatest common divisor of all values, 0 for an empty slice.
pub fn gcd(values: &[u64]) -> u64 {
    values.iter().fold(0, |acc, v| acc.gcd(v))
}

/// Least common multiple of all values, 1 for an empty slice.
pub fn lcm(values: &[u64]) -> u64 {
    values.iter().fold(1, |acc, v| acc.lcm(v))
}

/// Manhattan distance between two points
pub fn manhattan(a: (i64, i64), b: (i64, i64)) -> u64 {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

const BASE62_DIGITS: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Render `n` in base 62 (`0-9a-zA-Z`).
pub fn to_base62(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE62_DIGITS[(n % 62) as usize]);
        n /= 62;
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(gcd(&[12, 18, 30]), 6);
        assert_eq!(gcd(&[]), 0);
        assert_eq!(lcm(&[4, 6, 10]), 60);
        assert_eq!(lcm(&[]), 1);
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(manhattan((1, 6), (5, 11)), 9);
        assert_eq!(manhattan((-2, 3), (2, -3)), 10);
    }

    #[test]
    fn test_to_base62() {
        assert_eq!(to_base62(0), "0");
        assert_eq!(to_base62(9), "9");
        assert_eq!(to_base62(10), "a");
        assert_eq!(to_base62(61), "Z");
        assert_eq!(to_base62(62), "10");
        assert_eq!(to_base62(62 * 62 + 11), "10b");
    }
}
