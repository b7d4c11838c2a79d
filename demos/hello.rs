use varflag::{BoundedString, FlagSet};

fn main() {
    let mut shout = false;
    let mut number = 1;
    let mut name = BoundedString::with_value(32, "world");

    let mut flags = FlagSet::new("Greets whoever asks.");
    flags.bool_var(&mut shout, "shout", "greet in capitals");
    flags.int_var(&mut number, "n", "an `int` number of greetings");
    flags.string_var(&mut name, "name", "the `string` name to greet");
    let rest = flags.parse_or_exit(std::env::args()).to_vec();
    drop(flags);

    let mut message = format!("Hello {}", name);
    if shout {
        message = message.to_uppercase();
    }
    for _ in 0..number {
        println!("{}", message);
    }
    if rest.len() > 1 {
        println!("(ignored {} positional arguments)", rest.len() - 1);
    }
}
