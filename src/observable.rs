use crate::prelude::*;
use csv;
use std::io::Read;

#[derive(Clone)]
enum Field {
    Locus(Locus),
    Name,
    Ignored,
}

/// A parent read from delimited data: its name and genotype.
pub type Observation = (String, Genotype);

/// Produces named parent genotypes from u8 delimited data
///
/// Each row is one individual; each locus column holds an allele pair
/// such as `Ay/at`. `Csv` implements Iterator so rows can be collected
/// or searched by name with [`find_parent`].
pub struct Csv {
    records: std::iter::Enumerate<csv::StringRecordsIntoIter<Box<dyn Read>>>,
    fields: Vec<Field>,
    separator: String,
}

impl Csv {
    fn new(
        records: csv::StringRecordsIntoIter<Box<dyn Read>>,
        fields: Vec<Field>,
        separator: &str,
    ) -> Self {
        Self {
            records: records.into_iter().enumerate(),
            fields,
            separator: separator.to_owned(),
        }
    }

    fn parse_row(&self, idx: usize, row: &csv::StringRecord) -> GenotypeResult<Observation> {
        let mut individual = idx.to_string();
        let mut pairs = vec![];
        for (field, cell) in self.fields.iter().zip(row.iter()) {
            match field {
                Field::Name => {
                    individual = cell.trim().to_string();
                }
                Field::Locus(locus) => {
                    let alleles: Vec<&str> = cell.split(self.separator.as_str()).collect();
                    pairs.push((*locus, crate::pair_from_slice(*locus, &alleles)?));
                }
                Field::Ignored => {}
            }
        }
        Ok((individual, Genotype::new(pairs)?))
    }
}

impl Iterator for Csv {
    type Item = GenotypeResult<Observation>;

    fn next(&mut self) -> Option<GenotypeResult<Observation>> {
        match self.records.next()? {
            (idx, Ok(row)) => Some(self.parse_row(idx, &row)),
            (_, Err(e)) => Some(Err(e.into())),
        }
    }
}

/// Reads parents until one called `name` turns up.
pub fn find_parent<I>(observations: I, name: &str) -> GenotypeResult<Option<Genotype>>
where
    I: Iterator<Item = GenotypeResult<Observation>>,
{
    for observation in observations {
        let (individual, genotype) = observation?;
        if individual == name {
            return Ok(Some(genotype));
        }
    }
    Ok(None)
}

pub struct CsvBuilder {
    headers: bool,
    delimiter: u8,
    separator: String,
    name_field: String,
    strict: bool,
}

impl CsvBuilder {
    /// Construct a new Csv builder
    pub fn new() -> Self {
        Self {
            headers: true,
            delimiter: b',',
            separator: "/".to_owned(),
            name_field: "name".to_owned(),
            strict: false,
        }
    }

    /// Whether the first row names the columns.
    ///
    /// Without headers the first six columns are read as
    /// `E, A, B, D, M, S` and rows are named by their index.
    pub fn headers(&mut self, headers: bool) -> &mut Self {
        self.headers = headers;
        self
    }

    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    /// Separator between the two alleles of a cell.
    pub fn separator(&mut self, separator: &str) -> &mut Self {
        self.separator = separator.to_owned();
        self
    }

    pub fn name_field(&mut self, name_field: &str) -> &mut Self {
        self.name_field = name_field.to_owned();
        self
    }

    /// Reject header columns that are neither a locus nor the name field.
    pub fn strict(&mut self, strict: bool) -> &mut Self {
        self.strict = strict;
        self
    }

    pub fn from_reader(&self, reader: Box<dyn Read>) -> GenotypeResult<Csv> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(self.headers)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let fields = if self.headers {
            rdr.headers()?
                .iter()
                .map(|s| {
                    if s == self.name_field {
                        return Ok(Field::Name);
                    }
                    match s.parse::<Locus>() {
                        Ok(locus) => Ok(Field::Locus(locus)),
                        Err(e) if self.strict => Err(e),
                        Err(_) => Ok(Field::Ignored),
                    }
                })
                .collect::<GenotypeResult<Vec<_>>>()?
        } else {
            Locus::ALL.iter().map(|locus| Field::Locus(*locus)).collect()
        };

        Ok(Csv::new(rdr.into_records(), fields, &self.separator))
    }
}

impl Default for CsvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    const PARENTS: &str = "name,E,A,B,D,M,S,notes\n\
        Rex,E/E,Ay/at,B/b,D/d,M/m,n/n,sire\n\
        Luna,E/e,at/a,b/b,d/d,m/m,sp/n,dam\n";

    fn reader(data: &'static str) -> Box<dyn Read> {
        Box::new(data.as_bytes())
    }

    #[test]
    fn test_csv_with_header_reads_named_parents() -> Result<(), Box<dyn Error>> {
        let parents = CsvBuilder::new()
            .from_reader(reader(PARENTS))?
            .collect::<GenotypeResult<Vec<_>>>()?;
        assert_eq!(parents.len(), 2);
        assert_eq!(parents[0].0, "Rex");
        assert_eq!(
            parents[1].1,
            "E:E/e A:at/a B:b/b D:d/d M:m/m S:sp/n".parse::<Genotype>()?
        );
        Ok(())
    }

    #[test]
    fn test_csv_columns_in_any_order() -> Result<(), Box<dyn Error>> {
        let data = "S;M;D;B;A;E;name\nsp|n;m|m;d|d;b|b;at|a;E|e;Luna\n";
        let luna = find_parent(
            CsvBuilder::new()
                .delimiter(b';')
                .separator("|")
                .from_reader(reader(data))?,
            "Luna",
        )?;
        assert_eq!(luna, Some("E:E/e A:at/a B:b/b D:d/d M:m/m S:sp/n".parse::<Genotype>()?));
        Ok(())
    }

    #[test]
    fn test_csv_without_header_uses_locus_order() -> Result<(), Box<dyn Error>> {
        let data = "E/E,a/a,B/B,D/D,m/m,n/n\n";
        let parents = CsvBuilder::new()
            .headers(false)
            .from_reader(reader(data))?
            .collect::<GenotypeResult<Vec<_>>>()?;
        assert_eq!(parents[0].0, "0");
        assert_eq!(parents[0].1[Locus::A], AllelePair::new("a", "a"));
        Ok(())
    }

    #[test]
    fn test_find_parent_missing_name() -> Result<(), Box<dyn Error>> {
        let found = find_parent(CsvBuilder::new().from_reader(reader(PARENTS))?, "Bolt")?;
        assert!(found.is_none());
        Ok(())
    }

    #[test]
    fn test_csv_reports_bad_cells() -> Result<(), Box<dyn Error>> {
        let data = "name,E,A,B,D,M,S\nRex,E/E/E,a/a,B/B,D/D,m/m,n/n\n";
        let mut rows = CsvBuilder::new().from_reader(reader(data))?;
        assert!(matches!(rows.next(), Some(Err(GenotypeError::PairArity { found: 3, .. }))));
        Ok(())
    }

    #[test]
    fn test_strict_rejects_unknown_columns() {
        let result = CsvBuilder::new().strict(true).from_reader(reader(PARENTS));
        assert!(matches!(result, Err(GenotypeError::UnknownLocus(ref c)) if c == "notes"));
    }
}
