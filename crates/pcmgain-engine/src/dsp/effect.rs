/// Real-time safe effect interface over 16-bit PCM.
/// - process() must not allocate or lock on the hot path.
/// - `block` is interleaved i16 samples; output stays in the i16 range.
pub trait Effect: Send {
    fn prepare(&mut self, _sr: u32, _channels: u16) {}
    fn set_param(&mut self, _key: &str, _value: f32) {}
    fn process(&mut self, block: &mut [i16]);
}
