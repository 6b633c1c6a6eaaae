pub fn roll() -> u8 {
    rand::random()
}
