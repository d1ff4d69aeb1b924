use meteopole::StationRegistry;

fn main() {
    for station in StationRegistry::stations() {
        println!("{:<28} {}", station.name, station.endpoint());
    }
}
