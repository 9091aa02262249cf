use lariat::Lariat;

fn main() {
    let mut list: Lariat<i32, 4> = Lariat::new();

    println!("pushing 1..=5 (one split expected)");
    for v in 1..=5 {
        list.push_back(v).unwrap();
    }
    println!("{}", list);

    println!("push_front(0), insert(3, 99)");
    list.push_front(0).unwrap();
    list.insert(3, 99).unwrap();
    println!("{}", list);

    println!("remove(3) -> {:?}", list.remove(3));
    println!("pop_front -> {:?}, pop_back -> {:?}", list.pop_front(), list.pop_back());
    println!("{}", list);

    println!("find(3) -> {}, find(42) -> {}", list.find(&3), list.find(&42));

    println!("compacting {} nodes down", list.node_count());
    list.compact();
    println!("{}", list);
    println!("{:?}", list);
}
