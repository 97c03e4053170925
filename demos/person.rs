use std::collections::HashMap;

use fakers::{
    Generator, GeneratorOptions, Locale, Provider, ProviderCore, ProviderOptions,
    RandomGenerator, WeightedSet,
};

struct PersonProvider<G> {
    core: ProviderCore<PersonProvider<G>, String, G>,
    first_names: WeightedSet<String>,
    last_names: WeightedSet<String>,
}

#[fakers::operations(String)]
impl<G: Generator> PersonProvider<G> {
    fn new(generator: G, options: ProviderOptions) -> fakers::Result<Self> {
        let first_names = WeightedSet::from_pairs(
            [("Ada", 1.0), ("Grace", 3.0), ("Barbara", 2.0)].map(|(n, w)| (n.to_owned(), w)),
        )?;
        let last_names = WeightedSet::from_items(
            ["Lovelace", "Hopper", "Liskov", "Dijkstra"].map(str::to_owned),
        )?;
        Ok(Self {
            core: ProviderCore::new(Locale::default(), generator, options),
            first_names,
            last_names,
        })
    }

    pub fn first_name(&mut self) -> fakers::Result<String> {
        self.core.select_one(&self.first_names)
    }

    pub fn last_name(&mut self) -> fakers::Result<String> {
        self.core.select_one(&self.last_names)
    }

    pub fn name(&mut self) -> fakers::Result<String> {
        Ok(format!("{} {}", self.first_name()?, self.last_name()?))
    }
}

impl<G: Generator> Provider for PersonProvider<G> {
    type Generator = G;

    fn core(&self) -> &ProviderCore<Self, String, G> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ProviderCore<Self, String, G> {
        &mut self.core
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let generator = RandomGenerator::from_options(&GeneratorOptions { seed: Some(42) });
    let mut person = PersonProvider::new(generator, ProviderOptions::default().with_weighting(true))?;

    let mut hist: HashMap<String, u64> = HashMap::default();
    for _ in 0..60_000 {
        *hist.entry(person.get("FirstName")?).or_default() += 1;
    }

    println!("FirstName (weights Ada 1, Grace 3, Barbara 2):");
    let mut v: Vec<_> = hist.into_iter().collect();
    v.sort_by(|a, b| b.1.cmp(&a.1));
    for (k, c) in v {
        println!("{c:>6} {k}");
    }

    println!("\nA few full names:");
    for _ in 0..5 {
        println!("  {}", person.get("Name")?);
    }

    person.dispose();
    Ok(())
}
