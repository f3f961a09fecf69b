fn main() {
    blink_shutter_lib::run()
}
