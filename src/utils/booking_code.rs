// utils/booking_code.rs
use rand::Rng;

/// Human-readable booking reference: "BK" followed by six digits.
/// Uniqueness is enforced by the store; callers regenerate on collision.
pub fn generate_booking_code() -> String {
    let mut rng = rand::rng();
    format!("BK{}", rng.random_range(100000..1000000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_bk_plus_six_digits() {
        for _ in 0..100 {
            let code = generate_booking_code();
            assert_eq!(code.len(), 8);
            assert!(code.starts_with("BK"));
            assert!(code[2..].chars().all(|c| c.is_ascii_digit()));
        }
    }
}
