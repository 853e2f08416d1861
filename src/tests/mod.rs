mod sdr;
mod sel;

fn bytes(hex: &str) -> Vec<u8> {
    hex::decode(hex).unwrap()
}
