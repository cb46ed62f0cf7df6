use rectpack::{auto_pack_multiple, default_packer, Point};

fn main() {
    env_logger::init();

    let sizes = vec![Point::new(128, 128); 5];

    let mut packer = default_packer();
    let result = auto_pack_multiple(&mut packer, Point::new(256, 256), &sizes);

    println!("Pack result: {:#?}", result);
}
