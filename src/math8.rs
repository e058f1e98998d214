/// Blend two 8-bit values
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i16 - a as i16;

    let mut partial: u32 = (a as u32) << 16; // a * 65536
    partial = partial.wrapping_add(
        (delta as u32)
            .wrapping_mul(amount_of_b as u32)
            .wrapping_mul(257),
    ); // (b - a) * amount_of_b * 257
    partial = partial.wrapping_add(0x8000); // + 32768 for rounding

    (partial >> 16) as u8
}

/// Convert a unit fraction (0.0-1.0) into an 8-bit amount (0-255)
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn unit8(fraction: f32) -> u8 {
    libm::roundf(fraction.clamp(0.0, 1.0) * 255.0) as u8
}

/// Milliseconds elapsed between two instants, zero if `now` is earlier
#[inline]
pub const fn elapsed_ms(since: embassy_time::Instant, now: embassy_time::Instant) -> u64 {
    now.as_millis().saturating_sub(since.as_millis())
}
