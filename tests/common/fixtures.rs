//! Static datasets and configurations shared across harnesses.
//!
//! The registration corpus is small enough to reason about by eye; every
//! harness that counts matches is written against it. `registrations_csv`
//! generates a larger synthetic set for the concurrency and bench paths.

/// Eight registrations with every column populated except Fernanda's phone.
pub const REGISTRATIONS_CSV: &str = "\
name,surname,cpf,phone,birth_date,address,city,state
Ana,Silva,123.456.789-00,11 99999-0001,1990-03-14,Rua Augusta 100,São Paulo,SP
João,Souza,234.567.890-11,21 98888-0002,1985-07-02,Av. Atlântica 200,Rio de Janeiro,RJ
Maria,Oliveira,345.678.901-22,31 97777-0003,1992-11-23,Rua da Bahia 300,Belo Horizonte,MG
Pedro,Santos,456.789.012-33,11 96666-0004,1978-01-30,Rua Oscar Freire 400,São Paulo,SP
Juliana,Costa,567.890.123-44,41 95555-0005,2001-05-09,Rua XV de Novembro 500,Curitiba,PR
Carlos,Pereira,678.901.234-55,51 94444-0006,1969-09-17,Av. Ipiranga 600,Porto Alegre,RS
Fernanda,Lima,789.012.345-66,,1995-12-01,Rua das Flores 700,Campinas,SP
Lucas,Almeida,890.123.456-77,61 92222-0008,1988-04-25,SQS 308 Bloco A,Brasília,DF
";

/// Columns that must never appear in a response under [`STANDARD_POLICY_YAML`].
pub const SENSITIVE_COLUMNS: &[&str] = &["cpf", "phone", "birth_date", "address"];

/// Field policy used by most harnesses: four exposed, six searchable.
pub const STANDARD_POLICY_YAML: &str = "\
fields:
  exposed_fields: [name, surname, city, state]
  searchable_fields: [name, surname, cpf, phone, city, state]
";

/// Full configuration minus `data:`; callers append the CSV path.
pub const AGENT_YAML: &str = "\
agent:
  name: registration_agent
  display_name: Registration Data Agent
  description: Searches registration records
  version: 1.0.0
server:
  host: 127.0.0.1
  port: 8000
  metadata_endpoint: /.well-known/agent.json
";

/// Synthetic dataset of `rows` registrations. Every tenth row lives in
/// Recife so callers can predict hit counts.
pub fn registrations_csv(rows: usize) -> String {
    let mut out = String::from("name,surname,cpf,phone,city,state\n");
    for i in 0..rows {
        let (city, state) = if i % 10 == 0 { ("Recife", "PE") } else { ("Salvador", "BA") };
        out.push_str(&format!(
            "Person{i},Family{fam},{i:011},71 9{i:08},{city},{state}\n",
            fam = i % 97
        ));
    }
    out
}
